//! Transfers, processes and the activity history

use shared::{
    build_history, Inventory, ListFilter, Process, ProcessDraft, Transaction, TransferDraft,
};
use tracing::debug;

use super::{split_selection, FilterArgs, Output, ProcessesCommand, TransfersCommand};
use crate::api::{InventoryItems, ListQuery, Materials, Processes, Transactions};
use crate::error::ClientResult;
use crate::http::ApiClient;

fn transfer_rows(items: &[Transaction]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|tx| {
            vec![
                tx.id.to_string(),
                tx.sender.name.clone(),
                tx.receiver.name.clone(),
                tx.item_count().to_string(),
                tx.total_quantity().to_string(),
                tx.status.as_str().to_string(),
                tx.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect()
}

fn process_rows(items: &[Process]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|process| {
            vec![
                process.id.to_string(),
                process.organization.name.clone(),
                process.total_input().to_string(),
                process.total_output().to_string(),
                process.status.as_str().to_string(),
                process.started_at.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect()
}

async fn all_inventory(client: &ApiClient) -> ClientResult<Vec<Inventory>> {
    client
        .resource::<InventoryItems>()
        .list_fresh(&ListQuery::default())
        .await
}

/// Fill a transfer draft from `ID=QTY` selections
pub(crate) fn transfer_draft(
    sender: shared::Id,
    receiver: shared::Id,
    selections: &[String],
    inventory: &[Inventory],
) -> ClientResult<TransferDraft> {
    let mut draft = TransferDraft::new();
    draft.set_sender(sender);
    draft.receiver = Some(receiver);

    let stock: Vec<Inventory> = draft.sender_stock(inventory).into_iter().cloned().collect();
    for selection in selections {
        let (item, quantity) = split_selection(selection);
        let line = draft.lines.add(item, quantity, &stock)?;
        debug!("Transfer line {} <- {}", line, selection);
    }
    Ok(draft)
}

pub async fn transfers(
    client: &ApiClient,
    command: TransfersCommand,
    out: &Output,
) -> ClientResult<()> {
    let endpoint = client.resource::<Transactions>();
    match command {
        TransfersCommand::List(filter) => {
            let items = endpoint.search(&filter.to_filter()).await?;
            out.list(
                &items,
                &["ID", "Sender", "Receiver", "Items", "Total", "Status", "Created"],
                transfer_rows(&items),
            )
        }
        TransfersCommand::Show { id } => {
            let tx = endpoint.get(id).await?;
            let mut fields = vec![
                ("ID", tx.id.to_string()),
                ("Sender", tx.sender.name.clone()),
                ("Receiver", tx.receiver.name.clone()),
                ("Status", tx.status.to_string()),
                ("Created", tx.created_at.to_rfc3339()),
            ];
            for total in tx.totals_by_material() {
                fields.push(("Moved", format!("{} {} {}", total.quantity, total.unit, total.material)));
            }
            out.record(&tx, fields)
        }
        TransfersCommand::Create(args) => {
            let inventory = all_inventory(client).await?;
            let draft = transfer_draft(args.sender, args.receiver, &args.items, &inventory)?;
            let payload = draft.build()?;
            let saved = endpoint.create(&payload).await?;
            out.message(
                &saved,
                &format!(
                    "Created transfer {} with {} line(s), {} total",
                    saved.id,
                    draft.lines.line_count(),
                    draft.lines.total_quantity()
                ),
            )
        }
        TransfersCommand::Accept { id } => {
            let saved = client.accept_transfer(id).await?;
            out.message(&saved, &format!("Accepted transfer {}", id))
        }
        TransfersCommand::Reject { id } => {
            let saved = client.reject_transfer(id).await?;
            out.message(&saved, &format!("Rejected transfer {}", id))
        }
    }
}

pub async fn processes(
    client: &ApiClient,
    command: ProcessesCommand,
    out: &Output,
) -> ClientResult<()> {
    let endpoint = client.resource::<Processes>();
    match command {
        ProcessesCommand::List(filter) => {
            let items = endpoint.search(&filter.to_filter()).await?;
            out.list(
                &items,
                &["ID", "Organization", "Input", "Output", "Status", "Started"],
                process_rows(&items),
            )
        }
        ProcessesCommand::Show { id } => {
            let process = endpoint.get(id).await?;
            let mut fields = vec![
                ("ID", process.id.to_string()),
                ("Organization", process.organization.name.clone()),
                ("Status", process.status.to_string()),
                ("Started", process.started_at.to_rfc3339()),
                (
                    "Finished",
                    process
                        .finished_at
                        .map(|at| at.to_rfc3339())
                        .unwrap_or_default(),
                ),
            ];
            for input in &process.inputs {
                fields.push((
                    "Input",
                    format!(
                        "{} {} {}",
                        input.quantity, input.inventory.material.unit, input.inventory.material.name
                    ),
                ));
            }
            for output in &process.outputs {
                fields.push((
                    "Output",
                    format!("{} {} {}", output.quantity, output.material.unit, output.material.name),
                ));
            }
            out.record(&process, fields)
        }
        ProcessesCommand::Create(args) => {
            let inventory = all_inventory(client).await?;
            let materials = client
                .resource::<Materials>()
                .list(&ListQuery::default())
                .await?;

            let mut draft = ProcessDraft::new();
            draft.set_organization(args.organization);
            let stock: Vec<Inventory> = draft
                .organization_stock(&inventory)
                .into_iter()
                .cloned()
                .collect();
            for selection in &args.inputs {
                let (item, quantity) = split_selection(selection);
                draft.inputs.add(item, quantity, &stock)?;
            }
            for selection in &args.outputs {
                let (item, quantity) = split_selection(selection);
                draft.outputs.add(item, quantity, &materials)?;
            }

            let payload = draft.build()?;
            let saved = endpoint.create(&payload).await?;
            out.message(
                &saved,
                &format!(
                    "Started process {}: {} in, {} out",
                    saved.id,
                    draft.inputs.total_quantity(),
                    draft.outputs.total_quantity()
                ),
            )
        }
        ProcessesCommand::Complete { id } => {
            let saved = client.complete_process(id).await?;
            out.message(&saved, &format!("Completed process {}", id))
        }
    }
}

pub async fn history(client: &ApiClient, filter: FilterArgs, out: &Output) -> ClientResult<()> {
    let transactions = client
        .resource::<Transactions>()
        .list(&ListQuery::default())
        .await?;
    let processes = client
        .resource::<Processes>()
        .list(&ListQuery::default())
        .await?;

    let entries = build_history(&transactions, &processes);
    let filter: ListFilter = filter.to_filter();
    let visible: Vec<_> = filter.apply(&entries).into_iter().cloned().collect();

    let rows = visible
        .iter()
        .map(|entry| {
            vec![
                entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                format!("{:?}", entry.kind),
                entry.actor.clone(),
                entry.description.clone(),
                entry.status.clone(),
            ]
        })
        .collect();
    out.list(&visible, &["When", "Kind", "By", "What", "Status"], rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use serde_json::json;
    use shared::LineError;

    fn inventory(id: i64, owner: i64, material: &str, quantity: &str) -> Inventory {
        serde_json::from_value(json!({
            "id": id,
            "quantity": quantity,
            "organization": {
                "id": owner,
                "name": format!("Org {}", owner),
                "type": "gold_processing",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            },
            "material": {
                "id": id * 100,
                "name": material,
                "unit": "g",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            },
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_repeated_selections_accumulate() {
        let stock = vec![inventory(5, 1, "Gold", "100.5"), inventory(6, 2, "Silver", "10")];
        let draft = transfer_draft(1, 2, &["5=3".into(), "5=4".into()], &stock).unwrap();

        assert_eq!(draft.lines.line_count(), 1);
        assert_eq!(draft.lines.total_quantity().to_string(), "7");
        let payload = draft.build().unwrap();
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].inventory, 5);
    }

    #[test]
    fn test_overdraw_is_rejected_before_submission() {
        let stock = vec![inventory(5, 1, "Gold", "100.5")];
        let err = transfer_draft(1, 2, &["5=100".into(), "5=1".into()], &stock).unwrap_err();

        match err {
            ClientError::Line(LineError::ExceedsAvailable { material, .. }) => {
                assert_eq!(material, "Gold")
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_other_organizations_stock_is_not_selectable() {
        let stock = vec![inventory(5, 1, "Gold", "100.5"), inventory(6, 2, "Silver", "10")];
        let err = transfer_draft(1, 3, &["6=1".into()], &stock).unwrap_err();
        assert!(matches!(err, ClientError::Line(LineError::UnknownItem(_))));
    }
}
