use diesel::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::identities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Identity {
    pub id: i32,
    pub traits: JsonValue,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl Identity {
    pub fn new_with_traits(id: i32, traits: Traits) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Identity {
            id,
            traits: JsonValue::from(&traits),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn get_traits(&self) -> Traits {
        Traits::from(self.traits.clone())
    }

    /// The name shown next to everything this identity writes.
    pub fn display_name(&self) -> String {
        self.get_traits().display_name(self.id)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default)]
pub struct Traits {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Traits {
    pub fn display_name(&self, id: i32) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("user #{id}"))
    }
}

impl From<&Traits> for JsonValue {
    fn from(t: &Traits) -> Self {
        serde_json::json!({ "email": t.email, "name": t.name })
    }
}

impl From<JsonValue> for Traits {
    fn from(value: JsonValue) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::error!("Malformed identity traits: {e}");
            Traits::default()
        })
    }
}
