//! Dashboard user accounts

use shared::{NewUser, User, UserUpdate};

use super::resource::Resource;
use crate::cache::ResourceKind;

pub struct Users;

impl Resource for Users {
    const KIND: ResourceKind = ResourceKind::User;
    const PATH: &'static str = "auth/users/";

    type Item = User;
    type Create = NewUser;
    type Update = UserUpdate;
}
