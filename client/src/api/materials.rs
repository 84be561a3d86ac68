//! Materials catalogue

use shared::{Material, MaterialUpdate, NewMaterial};

use super::resource::Resource;
use crate::cache::{ResourceKind, Tag};

pub struct Materials;

impl Resource for Materials {
    const KIND: ResourceKind = ResourceKind::Material;
    const PATH: &'static str = "materials/";
    const SERVER_FILTER: bool = true;

    type Item = Material;
    type Create = NewMaterial;
    type Update = MaterialUpdate;

    fn dependents() -> &'static [Tag] {
        &[
            Tag::All(ResourceKind::Inventory),
            Tag::All(ResourceKind::DashboardStats),
        ]
    }
}
