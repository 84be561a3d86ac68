//! Form drafts for creating transfers and processes

use crate::lines::{InputLines, OutputLines};
use crate::models::{stock_of, Inventory, NewProcess, NewTransaction};
use crate::types::Id;
use crate::validation::ValidationError;

/// Transfer creation form
#[derive(Debug, Clone, Default)]
pub struct TransferDraft {
    pub sender: Option<Id>,
    pub receiver: Option<Id>,
    pub lines: InputLines,
}

impl TransferDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory the sender can draw from; empty until a sender is chosen
    pub fn sender_stock<'a>(&self, inventory: &'a [Inventory]) -> Vec<&'a Inventory> {
        self.sender
            .map(|sender| stock_of(inventory, sender))
            .unwrap_or_default()
    }

    /// Switching sender invalidates lines drawn from the previous one
    pub fn set_sender(&mut self, sender: Id) {
        if self.sender != Some(sender) {
            self.lines.clear();
        }
        self.sender = Some(sender);
    }

    pub fn build(&self) -> Result<NewTransaction, ValidationError> {
        let sender = self.sender.ok_or(ValidationError::Required("Sender"))?;
        let receiver = self.receiver.ok_or(ValidationError::Required("Receiver"))?;
        if sender == receiver {
            return Err(ValidationError::SameOrganization);
        }
        if self.lines.is_empty() {
            return Err(ValidationError::NoLines("item"));
        }
        Ok(NewTransaction {
            sender,
            receiver,
            items: self.lines.transaction_items(),
        })
    }
}

/// Process creation form
#[derive(Debug, Clone, Default)]
pub struct ProcessDraft {
    pub organization: Option<Id>,
    pub inputs: InputLines,
    pub outputs: OutputLines,
}

impl ProcessDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn organization_stock<'a>(&self, inventory: &'a [Inventory]) -> Vec<&'a Inventory> {
        self.organization
            .map(|organization| stock_of(inventory, organization))
            .unwrap_or_default()
    }

    pub fn set_organization(&mut self, organization: Id) {
        if self.organization != Some(organization) {
            self.inputs.clear();
        }
        self.organization = Some(organization);
    }

    /// Outputs may be left empty and declared when the process completes
    pub fn build(&self) -> Result<NewProcess, ValidationError> {
        let organization = self
            .organization
            .ok_or(ValidationError::Required("Organization"))?;
        if self.inputs.is_empty() {
            return Err(ValidationError::NoLines("input"));
        }
        Ok(NewProcess {
            organization,
            inputs: self.inputs.process_inputs(),
            outputs: self.outputs.process_outputs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{dec, inventory, material};
    use crate::models::Unit;

    #[test]
    fn test_transfer_requires_both_parties() {
        let mut draft = TransferDraft::new();
        assert_eq!(draft.build(), Err(ValidationError::Required("Sender")));
        draft.set_sender(10);
        assert_eq!(draft.build(), Err(ValidationError::Required("Receiver")));
        draft.receiver = Some(10);
        assert_eq!(draft.build(), Err(ValidationError::SameOrganization));
        draft.receiver = Some(11);
        assert_eq!(draft.build(), Err(ValidationError::NoLines("item")));
    }

    #[test]
    fn test_transfer_builds_accumulated_items() {
        let stock = vec![
            inventory(1, "Gold", Unit::G, "100", 10),
            inventory(2, "Gold", Unit::G, "100", 20),
        ];
        let mut draft = TransferDraft::new();
        draft.set_sender(10);
        draft.receiver = Some(20);

        let selectable: Vec<Inventory> = draft.sender_stock(&stock).into_iter().cloned().collect();
        assert_eq!(selectable.len(), 1);

        draft.lines.add("1", "30", &selectable).unwrap();
        draft.lines.add("1", "15", &selectable).unwrap();
        // Inventory of another organization is not selectable
        assert!(draft.lines.add("2", "1", &selectable).is_err());

        let payload = draft.build().unwrap();
        assert_eq!(payload.sender, 10);
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].quantity, dec("45"));
    }

    #[test]
    fn test_changing_sender_resets_lines() {
        let stock = vec![inventory(1, "Gold", Unit::G, "100", 10)];
        let mut draft = TransferDraft::new();
        draft.set_sender(10);
        draft.lines.add("1", "5", &stock).unwrap();
        draft.set_sender(10);
        assert_eq!(draft.lines.line_count(), 1);
        draft.set_sender(30);
        assert!(draft.lines.is_empty());
    }

    #[test]
    fn test_process_draft() {
        let stock = vec![inventory(1, "Gold scrap", Unit::G, "50", 10)];
        let materials = vec![material(9, "Gold 999", Unit::G)];
        let mut draft = ProcessDraft::new();
        assert_eq!(draft.build(), Err(ValidationError::Required("Organization")));

        draft.set_organization(10);
        assert_eq!(draft.build(), Err(ValidationError::NoLines("input")));

        draft.inputs.add("1", "50", &stock).unwrap();
        let payload = draft.build().unwrap();
        assert!(payload.outputs.is_empty());

        draft.outputs.add("9", "48.7", &materials).unwrap();
        let payload = draft.build().unwrap();
        assert_eq!(payload.inputs[0].quantity, dec("50"));
        assert_eq!(payload.outputs[0].material, 9);
    }
}
