//! Request and response shapes.
//!
//! Input shapes carry only the client-supplied fields; output shapes are
//! built straight from stored records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{Order, User};

/// Body of `POST /users/` and `PUT /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UserIn {
    pub name: String,
    pub surname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserOut {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            created_at: user.created_at,
        }
    }
}

/// Body of `POST /orders/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct OrderIn {
    pub description: String,
    pub customer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderOut {
    pub id: String,
    pub description: String,
    pub customer: String,
}

impl From<Order> for OrderOut {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            description: order.description,
            customer: order.customer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn user_in_ignores_unknown_fields() {
        let body: UserIn = serde_json::from_value(json!({
            "name": "Ann",
            "surname": "Lee",
            "id": "forged",
        }))
        .unwrap();

        assert_eq!(
            body,
            UserIn {
                name: "Ann".to_string(),
                surname: "Lee".to_string()
            }
        );
    }

    #[rstest]
    #[case(json!({"name": "Ann"}))]
    #[case(json!({"surname": "Lee"}))]
    #[case(json!({"name": 1, "surname": "Lee"}))]
    #[case(json!({"name": null, "surname": "Lee"}))]
    fn user_in_rejects_missing_or_mistyped_fields(#[case] body: serde_json::Value) {
        assert!(serde_json::from_value::<UserIn>(body).is_err());
    }

    #[rstest]
    #[case(json!({"description": "Book"}))]
    #[case(json!({"customer": "c-1"}))]
    #[case(json!({"description": ["Book"], "customer": "c-1"}))]
    fn order_in_rejects_missing_or_mistyped_fields(#[case] body: serde_json::Value) {
        assert!(serde_json::from_value::<OrderIn>(body).is_err());
    }

    #[test]
    fn user_out_carries_every_stored_field() {
        let user = User {
            id: "u-1".to_string(),
            name: "Ann".to_string(),
            surname: "Lee".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };

        let value = serde_json::to_value(UserOut::from(user)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "u-1",
                "name": "Ann",
                "surname": "Lee",
                "created_at": "2024-05-01T12:30:00Z",
            })
        );
    }

    #[test]
    fn order_out_mirrors_the_stored_order() {
        let order = Order {
            id: "o-1".to_string(),
            description: "Book".to_string(),
            customer: "u-1".to_string(),
        };

        let value = serde_json::to_value(OrderOut::from(order)).unwrap();

        assert_eq!(value, json!({"id": "o-1", "description": "Book", "customer": "u-1"}));
    }
}
