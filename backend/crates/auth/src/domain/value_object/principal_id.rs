pub use kernel::id::PrincipalId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_id_new() {
        let id = PrincipalId::new();
        assert_eq!(id.as_uuid().get_version_num(), 4); // UUIDv4
    }

    #[test]
    fn test_from_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let id = PrincipalId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }
}
