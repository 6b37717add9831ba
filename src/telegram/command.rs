//! Operator command grammar.
//!
//! Commands look like `/addproduct Honey Cake | 28.50 | Layered honey
//! sponge`: a `/`-prefixed, case-insensitive name, then positional
//! fields separated by `|`. Parsing is a dedicated step producing a
//! typed [`Command`], so execution can match exhaustively instead of
//! switching on strings.

/// A fully parsed operator command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a category
    AddCategory {
        /// Category name
        name: String,
        /// Optional description
        description: String,
    },
    /// List all categories
    ListCategories,
    /// Delete a category by name
    DeleteCategory {
        /// Category name
        name: String,
    },
    /// Create a tag
    AddTag {
        /// Tag name
        name: String,
    },
    /// List all tags
    ListTags,
    /// Delete a tag by name
    DeleteTag {
        /// Tag name
        name: String,
    },
    /// Create a product
    AddProduct {
        /// Product name
        name: String,
        /// Unit price in euros
        price: f64,
        /// Optional description
        description: String,
    },
    /// List all active products
    ListProducts,
    /// Soft-delete a product by name
    DeleteProduct {
        /// Product name
        name: String,
    },
    /// Assign a product to a category
    SetCategory {
        /// Product name
        product: String,
        /// Category name
        category: String,
    },
    /// Attach a tag to a product
    TagProduct {
        /// Product name
        product: String,
        /// Tag name
        tag: String,
    },
    /// Show the command overview
    Help,
}

/// Why a message could not be parsed into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The text does not start with the command sentinel
    NotACommand,
    /// The command name is not recognized
    Unknown {
        /// The unrecognized name, without the sentinel
        name: String,
    },
    /// Required fields are missing or malformed
    Usage {
        /// The expected format
        usage: &'static str,
    },
}

/// Reply sent for `/help`, unknown commands and non-command text.
pub const HELP_TEXT: &str = "Available commands:\n\
    /addcategory <name> | [description]\n\
    /listcategories\n\
    /delcategory <name>\n\
    /addtag <name>\n\
    /listtags\n\
    /deltag <name>\n\
    /addproduct <name> | <price> | [description]\n\
    /listproducts\n\
    /delproduct <name>\n\
    /setcategory <product> | <category>\n\
    /tagproduct <product> | <tag>\n\
    /help";

const USAGE_ADD_CATEGORY: &str = "Usage: /addcategory <name> | [description]";
const USAGE_DEL_CATEGORY: &str = "Usage: /delcategory <name>";
const USAGE_ADD_TAG: &str = "Usage: /addtag <name>";
const USAGE_DEL_TAG: &str = "Usage: /deltag <name>";
const USAGE_ADD_PRODUCT: &str = "Usage: /addproduct <name> | <price> | [description]";
const USAGE_DEL_PRODUCT: &str = "Usage: /delproduct <name>";
const USAGE_SET_CATEGORY: &str = "Usage: /setcategory <product> | <category>";
const USAGE_TAG_PRODUCT: &str = "Usage: /tagproduct <product> | <tag>";

/// Parses a raw message into a [`Command`].
///
/// # Errors
/// Returns a [`CommandError`] describing why the text is not a valid
/// command; callers turn it into a user-facing reply.
pub fn parse(text: &str) -> Result<Command, CommandError> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return Err(CommandError::NotACommand);
    }

    let (head, tail) = match trimmed.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (trimmed, ""),
    };

    // In group chats commands arrive as /name@botname
    let name = head[1..]
        .split('@')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let fields: Vec<&str> = if tail.is_empty() {
        Vec::new()
    } else {
        tail.split('|').map(str::trim).collect()
    };

    match name.as_str() {
        "addcategory" => {
            let name = required(&fields, 0).ok_or(usage(USAGE_ADD_CATEGORY))?;
            Ok(Command::AddCategory {
                name: name.to_string(),
                description: optional(&fields, 1).to_string(),
            })
        }
        "listcategories" => Ok(Command::ListCategories),
        "delcategory" => {
            let name = required(&fields, 0).ok_or(usage(USAGE_DEL_CATEGORY))?;
            Ok(Command::DeleteCategory {
                name: name.to_string(),
            })
        }
        "addtag" => {
            let name = required(&fields, 0).ok_or(usage(USAGE_ADD_TAG))?;
            Ok(Command::AddTag {
                name: name.to_string(),
            })
        }
        "listtags" => Ok(Command::ListTags),
        "deltag" => {
            let name = required(&fields, 0).ok_or(usage(USAGE_DEL_TAG))?;
            Ok(Command::DeleteTag {
                name: name.to_string(),
            })
        }
        "addproduct" => {
            let name = required(&fields, 0).ok_or(usage(USAGE_ADD_PRODUCT))?;
            let price = required(&fields, 1)
                .and_then(|raw| raw.parse::<f64>().ok())
                .ok_or(usage(USAGE_ADD_PRODUCT))?;
            Ok(Command::AddProduct {
                name: name.to_string(),
                price,
                description: optional(&fields, 2).to_string(),
            })
        }
        "listproducts" => Ok(Command::ListProducts),
        "delproduct" => {
            let name = required(&fields, 0).ok_or(usage(USAGE_DEL_PRODUCT))?;
            Ok(Command::DeleteProduct {
                name: name.to_string(),
            })
        }
        "setcategory" => {
            let product = required(&fields, 0).ok_or(usage(USAGE_SET_CATEGORY))?;
            let category = required(&fields, 1).ok_or(usage(USAGE_SET_CATEGORY))?;
            Ok(Command::SetCategory {
                product: product.to_string(),
                category: category.to_string(),
            })
        }
        "tagproduct" => {
            let product = required(&fields, 0).ok_or(usage(USAGE_TAG_PRODUCT))?;
            let tag = required(&fields, 1).ok_or(usage(USAGE_TAG_PRODUCT))?;
            Ok(Command::TagProduct {
                product: product.to_string(),
                tag: tag.to_string(),
            })
        }
        "help" | "start" => Ok(Command::Help),
        _ => Err(CommandError::Unknown { name }),
    }
}

fn required<'a>(fields: &[&'a str], index: usize) -> Option<&'a str> {
    fields.get(index).copied().filter(|f| !f.is_empty())
}

fn optional<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).copied().unwrap_or_default()
}

const fn usage(usage: &'static str) -> CommandError {
    CommandError::Usage { usage }
}
