//! Organizations (workshops)

use shared::{NewOrganization, Organization, OrganizationUpdate};

use super::resource::Resource;
use crate::cache::{ResourceKind, Tag};

pub struct Organizations;

impl Resource for Organizations {
    const KIND: ResourceKind = ResourceKind::Organization;
    const PATH: &'static str = "organizations/";

    type Item = Organization;
    type Create = NewOrganization;
    type Update = OrganizationUpdate;

    // Inventory rows and transfers embed the organization
    fn dependents() -> &'static [Tag] {
        &[
            Tag::All(ResourceKind::Inventory),
            Tag::All(ResourceKind::Transaction),
            Tag::All(ResourceKind::DashboardStats),
        ]
    }
}
