//! Line builders for transfer and process forms
//!
//! A line builder accumulates `(item, quantity)` selections into one line per
//! item. Input lines draw on existing inventory and are capped by its
//! available quantity; output lines declare newly produced materials and are
//! not capped.

use std::marker::PhantomData;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    Inventory, Material, NewProcessInput, NewProcessOutput, NewTransactionItem, Unit,
};
use crate::types::Id;
use crate::validation::{parse_id, parse_quantity};

/// Something a line can be drawn from
pub trait StockSource {
    fn stock_id(&self) -> Id;
    fn material_name(&self) -> &str;
    fn unit(&self) -> Unit;
    /// Ceiling for accumulated quantity, `None` when uncapped
    fn available(&self) -> Option<Decimal>;
}

impl StockSource for Inventory {
    fn stock_id(&self) -> Id {
        self.id
    }

    fn material_name(&self) -> &str {
        &self.material.name
    }

    fn unit(&self) -> Unit {
        self.material.unit
    }

    fn available(&self) -> Option<Decimal> {
        Some(self.quantity)
    }
}

impl StockSource for Material {
    fn stock_id(&self) -> Id {
        self.id
    }

    fn material_name(&self) -> &str {
        &self.name
    }

    fn unit(&self) -> Unit {
        self.unit
    }

    fn available(&self) -> Option<Decimal> {
        None
    }
}

/// Client-generated line identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One accumulated line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub item: Id,
    pub quantity: Decimal,
}

/// Raw form fields for the next line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCandidate {
    pub item: String,
    pub quantity: String,
}

impl LineCandidate {
    pub fn new(item: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            quantity: quantity.into(),
        }
    }
}

/// Reasons a line is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error("Select an item first")]
    MissingItem,

    #[error("{0}")]
    InvalidQuantity(&'static str),

    #[error("Item {0} is not in the loaded list")]
    UnknownItem(String),

    #[error("No {material} left in stock")]
    OutOfStock { material: String },

    #[error("Not enough {material}: only {available} {unit} available")]
    ExceedsAvailable {
        material: String,
        available: Decimal,
        unit: Unit,
        requested: Decimal,
    },
}

/// Accumulates lines drawn from `S`
#[derive(Debug, Clone)]
pub struct LineBuilder<S> {
    lines: Vec<Line>,
    next_id: u32,
    /// Form fields of the line being entered
    pub candidate: LineCandidate,
    error: Option<String>,
    _source: PhantomData<fn() -> S>,
}

/// Lines consuming existing inventory
pub type InputLines = LineBuilder<Inventory>;

/// Lines declaring produced materials
pub type OutputLines = LineBuilder<Material>;

impl<S> Default for LineBuilder<S> {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            next_id: 1,
            candidate: LineCandidate::default(),
            error: None,
            _source: PhantomData,
        }
    }
}

impl<S: StockSource> LineBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `item`, merging into an existing line for the same item.
    ///
    /// A rejected addition leaves the lines untouched.
    pub fn add(&mut self, item: &str, quantity: &str, stock: &[S]) -> Result<LineId, LineError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(LineError::MissingItem);
        }
        let quantity = parse_quantity(quantity).map_err(LineError::InvalidQuantity)?;

        let source = parse_id(item)
            .and_then(|id| stock.iter().find(|s| s.stock_id() == id))
            .ok_or_else(|| LineError::UnknownItem(item.to_string()))?;

        let available = source.available();
        if let Some(available) = available {
            if available <= Decimal::ZERO {
                return Err(LineError::OutOfStock {
                    material: source.material_name().to_string(),
                });
            }
        }

        let existing = self
            .lines
            .iter()
            .position(|line| line.item == source.stock_id());
        let new_total = match existing {
            Some(idx) => self.lines[idx]
                .quantity
                .checked_add(quantity)
                .ok_or(LineError::InvalidQuantity("Quantity is too large"))?,
            None => quantity,
        };

        if let Some(available) = available {
            if new_total > available {
                return Err(LineError::ExceedsAvailable {
                    material: source.material_name().to_string(),
                    available,
                    unit: source.unit(),
                    requested: new_total,
                });
            }
        }

        match existing {
            Some(idx) => {
                self.lines[idx].quantity = new_total;
                Ok(self.lines[idx].id)
            }
            None => {
                let id = LineId(self.next_id);
                self.next_id += 1;
                self.lines.push(Line {
                    id,
                    item: source.stock_id(),
                    quantity,
                });
                Ok(id)
            }
        }
    }

    /// Add the current candidate; success clears the form, failure keeps it
    pub fn submit(&mut self, stock: &[S]) -> Result<LineId, LineError> {
        let candidate = self.candidate.clone();
        match self.add(&candidate.item, &candidate.quantity, stock) {
            Ok(id) => {
                self.candidate = LineCandidate::default();
                self.error = None;
                Ok(id)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Headroom left for `item` after what is already accumulated
    pub fn remaining(&self, item: Id, stock: &[S]) -> Option<Decimal> {
        let source = stock.iter().find(|s| s.stock_id() == item)?;
        let available = source.available()?;
        Some(available.saturating_sub(self.quantity_of(item)))
    }
}

impl<S> LineBuilder<S> {
    /// Drop a line; removal only adds headroom so nothing is re-validated
    pub fn remove(&mut self, id: LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.candidate = LineCandidate::default();
        self.error = None;
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities, saturating at `Decimal::MAX`
    pub fn total_quantity(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |total, line| total.saturating_add(line.quantity))
    }

    pub fn quantity_of(&self, item: Id) -> Decimal {
        self.lines
            .iter()
            .find(|line| line.item == item)
            .map_or(Decimal::ZERO, |line| line.quantity)
    }

    /// Message of the last rejected submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl LineBuilder<Inventory> {
    pub fn transaction_items(&self) -> Vec<NewTransactionItem> {
        self.lines
            .iter()
            .map(|line| NewTransactionItem {
                inventory: line.item,
                quantity: line.quantity,
            })
            .collect()
    }

    pub fn process_inputs(&self) -> Vec<NewProcessInput> {
        self.lines
            .iter()
            .map(|line| NewProcessInput {
                inventory: line.item,
                quantity: line.quantity,
            })
            .collect()
    }
}

impl LineBuilder<Material> {
    pub fn process_outputs(&self) -> Vec<NewProcessOutput> {
        self.lines
            .iter()
            .map(|line| NewProcessOutput {
                material: line.item,
                quantity: line.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{dec, inventory, material};

    #[test]
    fn test_gold_scenario() {
        let stock = vec![inventory(1, "Gold", Unit::G, "100.5", 10)];
        let mut lines = InputLines::new();

        lines.add("1", "40", &stock).unwrap();
        assert_eq!(lines.line_count(), 1);
        assert_eq!(lines.lines()[0].quantity, dec("40"));

        lines.add("1", "50", &stock).unwrap();
        assert_eq!(lines.line_count(), 1);
        assert_eq!(lines.lines()[0].quantity, dec("90"));

        let err = lines.add("1", "20", &stock).unwrap_err();
        assert_eq!(
            err,
            LineError::ExceedsAvailable {
                material: "Gold".into(),
                available: dec("100.5"),
                unit: Unit::G,
                requested: dec("110"),
            }
        );
        assert_eq!(err.to_string(), "Not enough Gold: only 100.5 g available");
        assert_eq!(lines.lines()[0].quantity, dec("90"));
    }

    #[test]
    fn test_same_inventory_merges_into_one_line() {
        let stock = vec![inventory(7, "Silver", Unit::G, "7", 10)];
        let mut lines = InputLines::new();
        let first = lines.add("7", "3", &stock).unwrap();
        let second = lines.add("7", "4", &stock).unwrap();

        assert_eq!(first, second);
        assert_eq!(lines.lines(), &[Line { id: first, item: 7, quantity: dec("7") }]);
    }

    #[test]
    fn test_distinct_inventories_get_distinct_lines() {
        let stock = vec![
            inventory(1, "Gold", Unit::G, "10", 10),
            inventory(2, "Diamond", Unit::Ct, "5", 10),
        ];
        let mut lines = InputLines::new();
        lines.add("1", "2", &stock).unwrap();
        lines.add("2", "1.5", &stock).unwrap();

        assert_eq!(lines.line_count(), 2);
        assert_eq!(lines.total_quantity(), dec("3.5"));
        assert_ne!(lines.lines()[0].id, lines.lines()[1].id);
    }

    #[test]
    fn test_rejects_bad_candidates_without_mutation() {
        let stock = vec![inventory(1, "Gold", Unit::G, "10", 10)];
        let mut lines = InputLines::new();
        lines.add("1", "1", &stock).unwrap();
        let snapshot = lines.lines().to_vec();

        assert_eq!(lines.add("", "5", &stock), Err(LineError::MissingItem));
        assert!(matches!(
            lines.add("1", "abc", &stock),
            Err(LineError::InvalidQuantity(_))
        ));
        assert!(matches!(
            lines.add("1", "0", &stock),
            Err(LineError::InvalidQuantity(_))
        ));
        assert!(matches!(
            lines.add("1", "-2", &stock),
            Err(LineError::InvalidQuantity(_))
        ));
        assert_eq!(
            lines.add("99", "1", &stock),
            Err(LineError::UnknownItem("99".into()))
        );

        assert_eq!(lines.lines(), snapshot.as_slice());
    }

    #[test]
    fn test_first_addition_above_available_is_rejected() {
        let stock = vec![inventory(1, "Gold", Unit::G, "5", 10)];
        let mut lines = InputLines::new();
        assert!(matches!(
            lines.add("1", "6", &stock),
            Err(LineError::ExceedsAvailable { .. })
        ));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_empty_inventory_is_out_of_stock() {
        let stock = vec![inventory(3, "Platinum", Unit::G, "0", 10)];
        let mut lines = InputLines::new();
        assert_eq!(
            lines.add("3", "1", &stock),
            Err(LineError::OutOfStock {
                material: "Platinum".into()
            })
        );
    }

    #[test]
    fn test_submit_clears_form_on_success_and_keeps_it_on_error() {
        let stock = vec![inventory(1, "Gold", Unit::G, "10", 10)];
        let mut lines = InputLines::new();

        lines.candidate = LineCandidate::new("1", "20");
        assert!(lines.submit(&stock).is_err());
        assert_eq!(lines.candidate, LineCandidate::new("1", "20"));
        assert_eq!(lines.error(), Some("Not enough Gold: only 10 g available"));

        lines.candidate.quantity = "4".into();
        lines.submit(&stock).unwrap();
        assert_eq!(lines.candidate, LineCandidate::default());
        assert_eq!(lines.error(), None);
        assert_eq!(lines.remaining(1, &stock), Some(dec("6")));
    }

    #[test]
    fn test_remove_frees_headroom() {
        let stock = vec![inventory(1, "Gold", Unit::G, "10", 10)];
        let mut lines = InputLines::new();
        let id = lines.add("1", "10", &stock).unwrap();
        assert!(lines.add("1", "1", &stock).is_err());

        assert!(lines.remove(id));
        assert!(!lines.remove(id));
        assert!(lines.add("1", "1", &stock).is_ok());
    }

    #[test]
    fn test_outputs_are_not_capped() {
        let materials = vec![material(5, "Ring blank", Unit::Pcs)];
        let mut outputs = OutputLines::new();
        outputs.add("5", "1000", &materials).unwrap();
        outputs.add("5", "1000", &materials).unwrap();

        assert_eq!(
            outputs.process_outputs(),
            vec![NewProcessOutput {
                material: 5,
                quantity: dec("2000")
            }]
        );
        assert_eq!(outputs.remaining(5, &materials), None);
    }

    #[test]
    fn test_overflowing_output_is_rejected() {
        let materials = vec![material(9, "Silver sheet", Unit::G)];
        let mut outputs = OutputLines::new();
        outputs.add("9", "79228162514264337593543950335", &materials).unwrap();

        assert_eq!(
            outputs.add("9", "1", &materials),
            Err(LineError::InvalidQuantity("Quantity is too large"))
        );
        assert_eq!(outputs.quantity_of(9), Decimal::MAX);
        assert_eq!(outputs.line_count(), 1);
    }

    #[test]
    fn test_total_quantity_saturates() {
        let materials = vec![
            material(9, "Silver sheet", Unit::G),
            material(10, "Gold wire", Unit::G),
        ];
        let mut outputs = OutputLines::new();
        outputs.add("9", "79228162514264337593543950335", &materials).unwrap();
        outputs.add("10", "5", &materials).unwrap();

        assert_eq!(outputs.total_quantity(), Decimal::MAX);
    }

    #[test]
    fn test_payload_conversion() {
        let stock = vec![inventory(1, "Gold", Unit::G, "10", 10)];
        let mut lines = InputLines::new();
        lines.add("1", "2.5", &stock).unwrap();

        assert_eq!(
            lines.transaction_items(),
            vec![NewTransactionItem {
                inventory: 1,
                quantity: dec("2.5")
            }]
        );
        assert_eq!(lines.process_inputs()[0].inventory, 1);
    }
}
