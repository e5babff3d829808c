use pluton_engine::NativeResource;
use pluton_types::{NetId, Vec3};
use std::fmt;

/// Non-caching view over a gatherable [`NativeResource`].
#[derive(Clone, Copy)]
pub struct Resource<'a> {
    native: &'a dyn NativeResource,
}

impl<'a> Resource<'a> {
    pub fn new(native: &'a dyn NativeResource) -> Self {
        Self { native }
    }

    pub fn native(&self) -> &'a dyn NativeResource {
        self.native
    }

    pub fn id(&self) -> NetId {
        self.native.net_id()
    }

    pub fn name(&self) -> String {
        self.native.prefab_name()
    }

    pub fn health(&self) -> f32 {
        self.native.health()
    }

    pub fn location(&self) -> Vec3 {
        self.native.position()
    }
}

impl PartialEq for Resource<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Resource<'_> {}

impl fmt::Debug for Resource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("health", &self.health())
            .finish()
    }
}
