use uuid::Uuid;

/// Opaque request identifier
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
