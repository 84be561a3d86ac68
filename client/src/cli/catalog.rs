//! Organizations, materials, users, inventory and the dashboard summary

use serde_json::json;
use shared::{
    ensure_unique_name, validate_email, validate_password, validate_payload, validate_username,
    Id, Inventory, Material, MaterialUpdate, NewMaterial, NewOrganization, NewUser, Organization,
    OrganizationUpdate, User, UserUpdate, ValidationError,
};

use super::{
    FilterArgs, InventoryCommand, MaterialsCommand, OrganizationsCommand, Output, UsersCommand,
};
use crate::api::{InventoryItems, ListQuery, Materials, Organizations, Resource, Saved, Users};
use crate::error::ClientResult;
use crate::http::ApiClient;

pub async fn stats(client: &ApiClient, out: &Output) -> ClientResult<()> {
    let stats = client.dashboard_stats().await?;
    let mut fields = vec![
        ("Organizations", stats.organizations.to_string()),
        ("Materials", stats.materials.to_string()),
        ("Pending transfers", stats.pending_transactions.to_string()),
        ("Active processes", stats.active_processes.to_string()),
    ];
    for (key, value) in &stats.extra {
        fields.push((key.as_str(), value.to_string()));
    }
    out.record(&stats, fields)
}

async fn list_filtered<R: Resource>(
    client: &ApiClient,
    filter: &FilterArgs,
) -> ClientResult<Vec<R::Item>> {
    client.resource::<R>().search(&filter.to_filter()).await
}

fn saved(out: &Output, saved: &Saved, what: &str, verb: &str) -> ClientResult<()> {
    out.message(saved, &format!("{} {} {}", verb, what, saved.id))
}

fn deleted(out: &Output, what: &str, id: Id) -> ClientResult<()> {
    out.message(&json!({"deleted": id}), &format!("Deleted {} {}", what, id))
}

// ----------------------------------------------------------------------------
// Organizations
// ----------------------------------------------------------------------------

fn organization_rows(items: &[Organization]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|org| {
            vec![
                org.id.to_string(),
                org.name.clone(),
                org.kind.as_str().to_string(),
                org.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect()
}

async fn check_organization_name(
    client: &ApiClient,
    name: &str,
    except: Option<Id>,
) -> ClientResult<()> {
    let existing = client
        .resource::<Organizations>()
        .list(&ListQuery::default())
        .await?;
    ensure_unique_name(
        name,
        existing.iter().map(|org| (org.id, org.name.as_str())),
        except,
    )?;
    Ok(())
}

pub async fn organizations(
    client: &ApiClient,
    command: OrganizationsCommand,
    out: &Output,
) -> ClientResult<()> {
    let endpoint = client.resource::<Organizations>();
    match command {
        OrganizationsCommand::List(filter) => {
            let items = list_filtered::<Organizations>(client, &filter).await?;
            out.list(&items, &["ID", "Name", "Type", "Created"], organization_rows(&items))
        }
        OrganizationsCommand::Show { id } => {
            let org = endpoint.get(id).await?;
            out.record(
                &org,
                vec![
                    ("ID", org.id.to_string()),
                    ("Name", org.name.clone()),
                    ("Type", org.kind.to_string()),
                    ("Created", org.created_at.to_rfc3339()),
                    ("Updated", org.updated_at.to_rfc3339()),
                ],
            )
        }
        OrganizationsCommand::Create(args) => {
            let payload = NewOrganization {
                name: args.name.trim().to_string(),
                kind: args.kind,
            };
            validate_payload(&payload)?;
            check_organization_name(client, &payload.name, None).await?;
            saved(out, &endpoint.create(&payload).await?, "organization", "Created")
        }
        OrganizationsCommand::Update { id, fields } => {
            let name = fields.name.map(|name| name.trim().to_string());
            if let Some(name) = &name {
                check_organization_name(client, name, Some(id)).await?;
            }
            let patch = OrganizationUpdate {
                name,
                kind: fields.kind,
            };
            saved(out, &endpoint.update(id, &patch).await?, "organization", "Updated")
        }
        OrganizationsCommand::Delete { id } => {
            endpoint.delete(id).await?;
            deleted(out, "organization", id)
        }
    }
}

// ----------------------------------------------------------------------------
// Materials
// ----------------------------------------------------------------------------

fn material_rows(items: &[Material]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|material| {
            vec![
                material.id.to_string(),
                material.name.clone(),
                material.unit.to_string(),
            ]
        })
        .collect()
}

async fn check_material_name(client: &ApiClient, name: &str, except: Option<Id>) -> ClientResult<()> {
    let existing = client
        .resource::<Materials>()
        .list(&ListQuery::default())
        .await?;
    ensure_unique_name(
        name,
        existing.iter().map(|m| (m.id, m.name.as_str())),
        except,
    )?;
    Ok(())
}

pub async fn materials(
    client: &ApiClient,
    command: MaterialsCommand,
    out: &Output,
) -> ClientResult<()> {
    let endpoint = client.resource::<Materials>();
    match command {
        MaterialsCommand::List(filter) => {
            let items = list_filtered::<Materials>(client, &filter).await?;
            out.list(&items, &["ID", "Name", "Unit"], material_rows(&items))
        }
        MaterialsCommand::Show { id } => {
            let material = endpoint.get(id).await?;
            out.record(
                &material,
                vec![
                    ("ID", material.id.to_string()),
                    ("Name", material.name.clone()),
                    ("Unit", material.unit.to_string()),
                    ("Created", material.created_at.to_rfc3339()),
                ],
            )
        }
        MaterialsCommand::Create(args) => {
            let payload = NewMaterial {
                name: args.name.trim().to_string(),
                unit: args.unit,
            };
            validate_payload(&payload)?;
            check_material_name(client, &payload.name, None).await?;
            saved(out, &endpoint.create(&payload).await?, "material", "Created")
        }
        MaterialsCommand::Update { id, fields } => {
            let name = fields.name.map(|name| name.trim().to_string());
            if let Some(name) = &name {
                check_material_name(client, name, Some(id)).await?;
            }
            let patch = MaterialUpdate {
                name,
                unit: fields.unit,
            };
            saved(out, &endpoint.update(id, &patch).await?, "material", "Updated")
        }
        MaterialsCommand::Delete { id } => {
            endpoint.delete(id).await?;
            deleted(out, "material", id)
        }
    }
}

// ----------------------------------------------------------------------------
// Users
// ----------------------------------------------------------------------------

fn user_rows(items: &[User]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|user| {
            vec![
                user.id.to_string(),
                user.username.clone(),
                user.display_name(),
                user.email.clone(),
                user.organization_label().to_string(),
                user.activity_key().to_string(),
            ]
        })
        .collect()
}

pub async fn users(client: &ApiClient, command: UsersCommand, out: &Output) -> ClientResult<()> {
    let endpoint = client.resource::<Users>();
    match command {
        UsersCommand::List(filter) => {
            let items = list_filtered::<Users>(client, &filter).await?;
            out.list(
                &items,
                &["ID", "Username", "Name", "Email", "Organization", "Status"],
                user_rows(&items),
            )
        }
        UsersCommand::Show { id } => {
            let user = endpoint.get(id).await?;
            super::account::whoami(&user, out)
        }
        UsersCommand::Create(args) => {
            validate_username(&args.username).map_err(ValidationError::Invalid)?;
            validate_email(&args.email).map_err(ValidationError::Invalid)?;
            validate_password(&args.password).map_err(ValidationError::Invalid)?;
            let payload = NewUser {
                username: args.username.trim().to_string(),
                email: args.email.trim().to_string(),
                password: args.password,
                first_name: args.first_name,
                last_name: args.last_name,
                organization: args.organization,
                is_staff: args.staff,
            };
            validate_payload(&payload)?;
            saved(out, &endpoint.create(&payload).await?, "user", "Created")
        }
        UsersCommand::Update { id, fields } => {
            if let Some(email) = &fields.email {
                validate_email(email).map_err(ValidationError::Invalid)?;
            }
            let patch = UserUpdate {
                email: fields.email,
                first_name: fields.first_name,
                last_name: fields.last_name,
                organization: fields.organization,
                is_active: fields.active,
                is_staff: fields.staff,
            };
            saved(out, &endpoint.update(id, &patch).await?, "user", "Updated")
        }
        UsersCommand::Delete { id } => {
            endpoint.delete(id).await?;
            deleted(out, "user", id)
        }
    }
}

// ----------------------------------------------------------------------------
// Inventory
// ----------------------------------------------------------------------------

pub(crate) fn inventory_rows(items: &[Inventory]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|row| {
            vec![
                row.id.to_string(),
                row.organization.name.clone(),
                row.material.name.clone(),
                format!("{} {}", row.quantity, row.material.unit),
            ]
        })
        .collect()
}

pub async fn inventory(
    client: &ApiClient,
    command: InventoryCommand,
    out: &Output,
) -> ClientResult<()> {
    match command {
        InventoryCommand::List {
            filter,
            organization,
        } => {
            let items = match organization {
                Some(organization) => {
                    let held = client.inventory_of(organization).await?;
                    filter.to_filter().apply(&held).into_iter().cloned().collect()
                }
                None => list_filtered::<InventoryItems>(client, &filter).await?,
            };
            out.list(
                &items,
                &["ID", "Organization", "Material", "Quantity"],
                inventory_rows(&items),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::render::format_table;
    use serde_json::json;

    fn organization(id: Id, name: &str) -> Organization {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "type": "bank",
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_organization_rows() {
        let rows = organization_rows(&[organization(3, "Central Bank")]);
        assert_eq!(
            rows,
            vec![vec![
                "3".to_string(),
                "Central Bank".to_string(),
                "bank".to_string(),
                "2024-03-01".to_string()
            ]]
        );
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let rows = organization_rows(&[]);
        assert_eq!(format_table(&["ID"], &rows), crate::cli::EMPTY_PLACEHOLDER);
    }
}
