//! Transfer and process forms
//!
//! The page hands over the inventory (and, for processes, the materials)
//! it already loaded; the form keeps the draft and rejects lines that would
//! exceed the available stock before anything reaches the backend.

use shared::{Id, Inventory, Material, ProcessDraft, TransferDraft};
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::{js_error, parse_json, to_json};

fn report(context: &str, message: &str) -> JsValue {
    console::warn_1(&format!("{}: {}", context, message).into());
    js_error(message)
}

#[wasm_bindgen]
pub struct TransferForm {
    draft: TransferDraft,
    inventory: Vec<Inventory>,
}

impl TransferForm {
    pub fn from_json(inventory_json: &str) -> Result<TransferForm, String> {
        Ok(Self {
            draft: TransferDraft::new(),
            inventory: parse_json("inventory", inventory_json)?,
        })
    }

    fn selectable(&self) -> Vec<Inventory> {
        self.draft
            .sender_stock(&self.inventory)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn try_add_line(&mut self, item: &str, quantity: &str) -> Result<u32, String> {
        let stock = self.selectable();
        self.draft.lines.candidate.item = item.to_string();
        self.draft.lines.candidate.quantity = quantity.to_string();
        self.draft
            .lines
            .submit(&stock)
            .map(|id| id.0)
            .map_err(|err| err.to_string())
    }

    pub fn try_payload(&self) -> Result<String, String> {
        let payload = self.draft.build().map_err(|err| err.to_string())?;
        to_json(&payload)
    }
}

#[wasm_bindgen]
impl TransferForm {
    #[wasm_bindgen(constructor)]
    pub fn new(inventory_json: &str) -> Result<TransferForm, JsValue> {
        Self::from_json(inventory_json).map_err(js_error)
    }

    /// Choosing another sender drops lines drawn from the previous one
    pub fn set_sender(&mut self, sender: Id) {
        self.draft.set_sender(sender);
    }

    pub fn set_receiver(&mut self, receiver: Id) {
        self.draft.receiver = Some(receiver);
    }

    /// Inventory rows the current sender can draw from
    pub fn sender_stock(&self) -> Result<String, JsValue> {
        to_json(&self.draft.sender_stock(&self.inventory)).map_err(js_error)
    }

    pub fn add_line(&mut self, item: &str, quantity: &str) -> Result<u32, JsValue> {
        self.try_add_line(item, quantity)
            .map_err(|message| report("Transfer line rejected", &message))
    }

    pub fn remove_line(&mut self, line: u32) -> bool {
        self.draft.lines.remove(shared::LineId(line))
    }

    pub fn lines(&self) -> Result<String, JsValue> {
        to_json(self.draft.lines.lines()).map_err(js_error)
    }

    /// Inline message of the last rejected line
    pub fn error(&self) -> Option<String> {
        self.draft.lines.error().map(str::to_string)
    }

    pub fn total_quantity(&self) -> String {
        self.draft.lines.total_quantity().to_string()
    }

    /// JSON body for `POST /transactions/`
    pub fn payload(&self) -> Result<String, JsValue> {
        self.try_payload().map_err(js_error)
    }
}

#[wasm_bindgen]
pub struct ProcessForm {
    draft: ProcessDraft,
    inventory: Vec<Inventory>,
    materials: Vec<Material>,
}

impl ProcessForm {
    pub fn from_json(inventory_json: &str, materials_json: &str) -> Result<ProcessForm, String> {
        Ok(Self {
            draft: ProcessDraft::new(),
            inventory: parse_json("inventory", inventory_json)?,
            materials: parse_json("materials", materials_json)?,
        })
    }

    pub fn try_add_input(&mut self, item: &str, quantity: &str) -> Result<u32, String> {
        let stock: Vec<Inventory> = self
            .draft
            .organization_stock(&self.inventory)
            .into_iter()
            .cloned()
            .collect();
        self.draft.inputs.candidate.item = item.to_string();
        self.draft.inputs.candidate.quantity = quantity.to_string();
        self.draft
            .inputs
            .submit(&stock)
            .map(|id| id.0)
            .map_err(|err| err.to_string())
    }

    pub fn try_add_output(&mut self, material: &str, quantity: &str) -> Result<u32, String> {
        self.draft.outputs.candidate.item = material.to_string();
        self.draft.outputs.candidate.quantity = quantity.to_string();
        self.draft
            .outputs
            .submit(&self.materials)
            .map(|id| id.0)
            .map_err(|err| err.to_string())
    }

    pub fn try_payload(&self) -> Result<String, String> {
        let payload = self.draft.build().map_err(|err| err.to_string())?;
        to_json(&payload)
    }
}

#[wasm_bindgen]
impl ProcessForm {
    #[wasm_bindgen(constructor)]
    pub fn new(inventory_json: &str, materials_json: &str) -> Result<ProcessForm, JsValue> {
        Self::from_json(inventory_json, materials_json).map_err(js_error)
    }

    pub fn set_organization(&mut self, organization: Id) {
        self.draft.set_organization(organization);
    }

    pub fn organization_stock(&self) -> Result<String, JsValue> {
        to_json(&self.draft.organization_stock(&self.inventory)).map_err(js_error)
    }

    pub fn add_input(&mut self, item: &str, quantity: &str) -> Result<u32, JsValue> {
        self.try_add_input(item, quantity)
            .map_err(|message| report("Process input rejected", &message))
    }

    pub fn add_output(&mut self, material: &str, quantity: &str) -> Result<u32, JsValue> {
        self.try_add_output(material, quantity)
            .map_err(|message| report("Process output rejected", &message))
    }

    pub fn remove_input(&mut self, line: u32) -> bool {
        self.draft.inputs.remove(shared::LineId(line))
    }

    pub fn remove_output(&mut self, line: u32) -> bool {
        self.draft.outputs.remove(shared::LineId(line))
    }

    pub fn inputs(&self) -> Result<String, JsValue> {
        to_json(self.draft.inputs.lines()).map_err(js_error)
    }

    pub fn outputs(&self) -> Result<String, JsValue> {
        to_json(self.draft.outputs.lines()).map_err(js_error)
    }

    pub fn input_error(&self) -> Option<String> {
        self.draft.inputs.error().map(str::to_string)
    }

    pub fn output_error(&self) -> Option<String> {
        self.draft.outputs.error().map(str::to_string)
    }

    /// JSON body for `POST /processes/`
    pub fn payload(&self) -> Result<String, JsValue> {
        self.try_payload().map_err(js_error)
    }
}
