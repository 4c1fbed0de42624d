//! Quantity allocation across matching line items.
//!
//! A scanned quantity is poured into every line carrying the scanned code,
//! in store order then row order. Each line takes at most what it still
//! lacks; lines that are already complete are skipped. Whatever no line can
//! absorb lands on the last matching line as excess, so no scanned unit is
//! ever dropped.

use serde::{Deserialize, Serialize};

use scancheck_core::{DomainError, DomainResult, Ean, InvoiceId};
use scancheck_events::Event;

use crate::store::InvoiceStore;

/// How a single update changed its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillKind {
    /// The line took the rest of the scan and still lacks some quantity.
    Partial,
    /// The line reached exactly its expected quantity.
    Complete,
    /// Unabsorbable quantity dumped onto the last matching line.
    Excess,
}

/// Row highlight requested from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    None,
    Green,
    Red,
}

impl Highlight {
    /// CSS-style class name used by table renderers.
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Highlight::None => None,
            Highlight::Green => Some("highlight-green"),
            Highlight::Red => Some("highlight-red"),
        }
    }
}

impl FillKind {
    pub fn highlight(self) -> Highlight {
        match self {
            FillKind::Partial => Highlight::None,
            FillKind::Complete => Highlight::Green,
            FillKind::Excess => Highlight::Red,
        }
    }
}

/// Event: one line item's fulfilled quantity changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub invoice_id: InvoiceId,
    /// 0-based row position inside the invoice.
    pub position: usize,
    /// Quantity this update added to the line.
    pub allocated: u64,
    pub fulfilled_quantity: u64,
    pub kind: FillKind,
}

impl ItemUpdate {
    pub fn highlight(&self) -> Highlight {
        self.kind.highlight()
    }
}

impl Event for ItemUpdate {
    fn event_type(&self) -> &'static str {
        match self.kind {
            FillKind::Partial => "invoicing.line_item.partial",
            FillKind::Complete => "invoicing.line_item.complete",
            FillKind::Excess => "invoicing.line_item.excess",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

/// Result of a scan that matched at least one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub ean: Ean,
    pub requested: u64,
    /// Updates in the order they were applied.
    pub updates: Vec<ItemUpdate>,
    /// Quantity that exceeded the combined capacity of all matches.
    pub excess: u64,
}

impl Allocation {
    /// Total quantity handed out by all updates. Always equals `requested`.
    pub fn distributed(&self) -> u64 {
        self.updates.iter().map(|u| u.allocated).sum()
    }

    pub fn has_excess(&self) -> bool {
        self.excess > 0
    }
}

/// Distribute `quantity` of `ean` over the matching lines in `store`.
///
/// Returns [`DomainError::NoMatch`] without touching the store when no line
/// carries the code, and [`DomainError::QuantityOverflow`] when the excess
/// would not fit on the last match.
pub fn allocate(store: &mut InvoiceStore, ean: &Ean, quantity: u64) -> DomainResult<Allocation> {
    let slots = store.slots_for(ean.as_str());
    let Some(&last) = slots.last() else {
        return Err(DomainError::no_match(ean.clone()));
    };

    // Once any excess exists every match has been filled, so the last one
    // ends at max(fulfilled, expected) + excess.
    let capacity: u128 = slots
        .iter()
        .map(|&slot| u128::from(store.slot(slot).capacity()))
        .sum();
    let expected_excess = u128::from(quantity).saturating_sub(capacity);
    if expected_excess > 0 {
        let item = store.slot(last);
        let base = u128::from(item.fulfilled_quantity.max(item.expected_quantity));
        if u64::try_from(base + expected_excess).is_err() {
            return Err(DomainError::quantity_overflow(ean.clone()));
        }
    }

    let mut remaining = quantity;
    let mut updates = Vec::new();

    for &slot in &slots {
        if remaining == 0 {
            break;
        }
        let (invoice_id, item) = store.slot_mut(slot);
        let capacity = item.capacity();
        if capacity == 0 {
            continue;
        }

        let (allocated, kind) = if remaining < capacity {
            (remaining, FillKind::Partial)
        } else {
            (capacity, FillKind::Complete)
        };
        item.fulfilled_quantity += allocated;
        remaining -= allocated;

        updates.push(ItemUpdate {
            invoice_id: invoice_id.clone(),
            position: item.position,
            allocated,
            fulfilled_quantity: item.fulfilled_quantity,
            kind,
        });
    }

    // Every match is full: the rest goes onto the last one, even when that
    // line had no capacity to begin with.
    let excess = remaining;
    if excess > 0 {
        let (invoice_id, item) = store.slot_mut(last);
        item.fulfilled_quantity += excess;
        updates.push(ItemUpdate {
            invoice_id: invoice_id.clone(),
            position: item.position,
            allocated: excess,
            fulfilled_quantity: item.fulfilled_quantity,
            kind: FillKind::Excess,
        });
    }

    for update in &updates {
        tracing::debug!(
            event = update.event_type(),
            invoice = %update.invoice_id,
            position = update.position,
            allocated = update.allocated,
            fulfilled = update.fulfilled_quantity,
            "line item updated"
        );
    }
    if excess > 0 {
        tracing::warn!(ean = %ean, excess, "scan exceeds remaining quantity on all matches");
    }

    Ok(Allocation {
        ean: ean.clone(),
        requested: quantity,
        updates,
        excess,
    })
}
