use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

/// A validated item that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

/// The fixed field set accepted by item create and update.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl ItemFields {
    /// Build a `NewItem`; `name` is mandatory on create.
    pub fn into_new_item(self) -> AppResult<NewItem> {
        let name = match self.name {
            Some(name) => checked_name(name)?,
            None => return Err(AppError::Validation("Item name is required".to_string())),
        };
        Ok(NewItem {
            name,
            description: self.description,
            price: self.price,
            image: self.image,
        })
    }

    /// Overwrite every supplied field on `item`, leaving the rest untouched.
    pub fn apply_to(self, item: &mut Item) -> AppResult<()> {
        if let Some(name) = self.name {
            item.name = checked_name(name)?;
        }
        if let Some(description) = self.description {
            item.description = Some(description);
        }
        if let Some(price) = self.price {
            item.price = Some(price);
        }
        if let Some(image) = self.image {
            item.image = Some(image);
        }
        Ok(())
    }
}

fn checked_name(name: String) -> AppResult<String> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Item name cannot be empty".to_string()));
    }
    Ok(name)
}
