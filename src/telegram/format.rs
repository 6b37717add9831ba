//! Order message formatting.
//!
//! Pure functions turning a persisted order and its lines into the text
//! the operator sees. Given identical inputs the output is identical;
//! nothing here touches the clock, the store or the network.

use crate::core::cart::CartItem;
use crate::entities::OrderModel;

/// The display data for one order line, decoupled from the persisted
/// entities so the formatter can run before or after the store writes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Product name at order time
    pub name: String,
    /// Units ordered
    pub quantity: u32,
    /// Unit price snapshot in euros
    pub unit_price: f64,
    /// Optional free-text note for the line
    pub note: Option<String>,
    /// Whether the product is made to order
    pub is_custom_order: bool,
    /// Composition text shown for made-to-order items
    pub composition: String,
}

impl OrderLine {
    /// Builds a line from a cart item.
    #[must_use]
    pub fn from_cart_item(item: &CartItem) -> Self {
        Self {
            name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: item.product.price,
            note: item.note.clone(),
            is_custom_order: item.product.is_custom_order,
            composition: item.product.composition.clone(),
        }
    }
}

/// Renders the operator notification for a submitted order.
///
/// Callers must not invoke this with an empty `lines` slice; checkout
/// validates that upstream.
#[must_use]
pub fn format_order_message(order: &OrderModel, lines: &[OrderLine]) -> String {
    let mut out = String::new();

    out.push_str("🎂 New order received!\n\n");

    out.push_str("👤 Customer:\n");
    out.push_str(&format!("Name: {}\n", order.customer_name));
    if let Some(phone) = non_empty(order.phone.as_deref()) {
        out.push_str(&format!("Phone: {phone}\n"));
    }
    if let Some(handle) = non_empty(order.telegram.as_deref()) {
        out.push_str(&format!("Telegram: {handle}\n"));
    }
    if let Some(number) = non_empty(order.whatsapp.as_deref()) {
        out.push_str(&format!("WhatsApp: {number}\n"));
    }
    if let Some(handle) = non_empty(order.instagram.as_deref()) {
        out.push_str(&format!("Instagram: {handle}\n"));
    }

    if let Some(comments) = non_empty(order.comments.as_deref()) {
        out.push_str(&format!("\n💬 Comments:\n{comments}\n"));
    }

    out.push_str("\n🛒 Items:\n");
    for line in lines {
        let line_total = line.unit_price * f64::from(line.quantity);
        out.push_str(&format!(
            "- {}x {} — {}\n",
            line.quantity,
            line.name,
            euros(line_total)
        ));
        if let Some(note) = non_empty(line.note.as_deref()) {
            out.push_str(&format!("  Note: {note}\n"));
        }
        if line.is_custom_order && !line.composition.trim().is_empty() {
            out.push_str("  Composition:\n");
            for component in line.composition.lines() {
                out.push_str(&format!("    {component}\n"));
            }
        }
    }

    let subtotal: f64 = lines
        .iter()
        .map(|l| l.unit_price * f64::from(l.quantity))
        .sum();

    out.push_str(&format!("\nSubtotal: {}\n", euros(subtotal)));

    if order.delivery_method == "delivery" {
        let address = order.delivery_address.as_deref().unwrap_or("(no address)");
        match order.delivery_distance_m {
            Some(distance_m) => out.push_str(&format!(
                "🚚 Delivery: {address} ({:.1} km) — {}\n",
                distance_m / 1000.0,
                euros(order.delivery_cost)
            )),
            None => out.push_str(&format!(
                "🚚 Delivery: {address} — {}\n",
                euros(order.delivery_cost)
            )),
        }
    } else {
        out.push_str("🏠 Pickup from the bakery\n");
    }

    out.push_str(&format!(
        "💰 Total: {}\n",
        euros(subtotal + order.delivery_cost)
    ));

    out.push_str(&format!(
        "\n📅 Placed: {}\n",
        order.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("🔑 Order ID: {}\n", order.id));
    out.push_str(&format!("Status: {}\n", order.status.to_uppercase()));

    out
}

fn euros(value: f64) -> String {
    format!("€{value:.2}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
