//! WebAssembly bindings for the workshop admin dashboard
//!
//! Provides browser-side:
//! - Transfer and process forms with stock-capped line accumulation
//! - List filtering and the activity history
//! - Route resolution for localized and legacy paths
//! - Session storage on top of `localStorage`

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{
    build_history, DateRange, Filterable, Inventory, ListFilter, Material, Organization, Process,
    Page, Transaction, User,
};
use wasm_bindgen::prelude::*;

mod forms;
mod storage;

pub use forms::{ProcessForm, TransferForm};
pub use storage::{
    bearer_header, clear_session, has_session, save_login, session_user, BrowserSessionStore,
};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

pub(crate) fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

pub(crate) fn parse_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Invalid date: {}", raw))
}

fn list_filter(search: &str, status: &str, from: &str, to: &str) -> Result<ListFilter, String> {
    Ok(ListFilter::new()
        .search(search)
        .status(status)
        .range(DateRange {
            from: parse_date(from)?,
            to: parse_date(to)?,
        }))
}

fn filter_items<T: Filterable + Serialize + DeserializeOwned>(
    items_json: &str,
    filter: &ListFilter,
) -> Result<String, String> {
    let items: Vec<T> = parse_json("list", items_json)?;
    to_json(&filter.apply(&items))
}

/// Filter one list page's rows
pub fn filter_list_json(
    kind: &str,
    items_json: &str,
    search: &str,
    status: &str,
    from: &str,
    to: &str,
) -> Result<String, String> {
    let filter = list_filter(search, status, from, to)?;
    match kind {
        "organizations" | "workshops" => filter_items::<Organization>(items_json, &filter),
        "materials" => filter_items::<Material>(items_json, &filter),
        "inventory" => filter_items::<Inventory>(items_json, &filter),
        "transfers" | "transactions" => filter_items::<Transaction>(items_json, &filter),
        "processes" => filter_items::<Process>(items_json, &filter),
        "users" => filter_items::<User>(items_json, &filter),
        other => Err(format!("Unknown list: {}", other)),
    }
}

/// Filter the rows of a list page; `status` "all" or empty disables that filter
#[wasm_bindgen]
pub fn filter_list(
    kind: &str,
    items_json: &str,
    search: &str,
    status: &str,
    from: &str,
    to: &str,
) -> Result<String, JsValue> {
    filter_list_json(kind, items_json, search, status, from, to).map_err(js_error)
}

pub fn history_json(
    transactions_json: &str,
    processes_json: &str,
    search: &str,
    from: &str,
    to: &str,
) -> Result<String, String> {
    let transactions: Vec<Transaction> = parse_json("transactions", transactions_json)?;
    let processes: Vec<Process> = parse_json("processes", processes_json)?;
    let entries = build_history(&transactions, &processes);
    let filter = list_filter(search, "", from, to)?;
    to_json(&filter.apply(&entries))
}

/// Transfers and processes merged newest first, then filtered
#[wasm_bindgen]
pub fn history(
    transactions_json: &str,
    processes_json: &str,
    search: &str,
    from: &str,
    to: &str,
) -> Result<String, JsValue> {
    history_json(transactions_json, processes_json, search, from, to).map_err(js_error)
}

#[derive(Serialize)]
struct ResolvedRoute {
    locale: String,
    path: String,
    legacy: bool,
    requires_session: bool,
}

pub fn resolve_route_json(path: &str) -> Option<String> {
    let route = Page::parse(path)?;
    to_json(&ResolvedRoute {
        locale: route.locale.code().to_string(),
        path: route.canonical(),
        legacy: route.legacy,
        requires_session: route.page.requires_session(),
    })
    .ok()
}

/// Resolve a browser path to its canonical localized page, `undefined` if unknown
#[wasm_bindgen]
pub fn resolve_route(path: &str) -> Option<String> {
    resolve_route_json(path)
}
