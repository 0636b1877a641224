use bingodash_model::EntityId;

/// Records with a stable, unique key assigned by the backend.
pub trait Keyed {
    fn key(&self) -> &EntityId;

    fn has_key(&self, id: &EntityId) -> bool {
        self.key() == id
    }
}
