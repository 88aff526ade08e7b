//! Cart engine
//!
//! Maintains the customer's pending selection with merge semantics and
//! derived totals, independent of network connectivity. The cart is
//! owned by one customer device and scoped to one table; every
//! mutation persists the full line list to the durable store before
//! returning.

mod storage;
pub use storage::{CartStore, StoreError, StoreResult};

use crate::error::{ClientError, ClientResult};
use shared::{util, CartLine, CartLineInput, CartSnapshot};

/// Client-local cart for one table
pub struct CartEngine {
    table_number: String,
    lines: Vec<CartLine>,
    store: CartStore,
}

impl CartEngine {
    /// Open the cart for a table, restoring any persisted lines
    ///
    /// A reload after a crash reconstructs the cart exactly as of the
    /// last acknowledged mutation.
    pub fn open(store: CartStore, table_number: impl Into<String>) -> ClientResult<Self> {
        let table_number = table_number.into();
        let lines = store.load_lines(&table_number)?;
        if !lines.is_empty() {
            tracing::debug!(
                table = %table_number,
                lines = lines.len(),
                "Restored cart from store"
            );
        }
        Ok(Self {
            table_number,
            lines,
            store,
        })
    }

    /// Table this cart is scoped to
    pub fn table_number(&self) -> &str {
        &self.table_number
    }

    /// Add an item selection to the cart
    ///
    /// If a line with the same menu item, size and special instructions
    /// already exists, its quantity is increased instead of appending a
    /// duplicate. Returns the ID of the affected line.
    pub fn add_line(&mut self, input: CartLineInput) -> ClientResult<String> {
        if input.quantity < 1 {
            return Err(ClientError::Validation(format!(
                "quantity must be at least 1, got {}",
                input.quantity
            )));
        }
        if !input.unit_price.is_finite() || input.unit_price <= 0.0 {
            return Err(ClientError::Validation(format!(
                "unit price must be positive, got {}",
                input.unit_price
            )));
        }

        let line_id = match self
            .lines
            .iter_mut()
            .find(|line| line.merge_key() == input.merge_key())
        {
            Some(existing) => {
                existing.quantity += input.quantity;
                existing.line_id.clone()
            }
            None => {
                let line = CartLine {
                    line_id: util::local_id(),
                    menu_item_id: input.menu_item_id,
                    name: input.name,
                    size_label: input.size_label,
                    unit_price: input.unit_price,
                    quantity: input.quantity,
                    special_instructions: input.special_instructions,
                    added_at: util::now_millis(),
                };
                let id = line.line_id.clone();
                self.lines.push(line);
                id
            }
        };

        self.persist()?;
        Ok(line_id)
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn set_quantity(&mut self, line_id: &str, quantity: i32) -> ClientResult<()> {
        if quantity <= 0 {
            return self.remove_line(line_id);
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.line_id == line_id) {
            line.quantity = quantity;
            self.persist()?;
        }
        Ok(())
    }

    /// Remove a line; unknown IDs are a no-op
    pub fn remove_line(&mut self, line_id: &str) -> ClientResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.line_id != line_id);
        if self.lines.len() != before {
            self.persist()?;
        }
        Ok(())
    }

    /// Empty the cart
    pub fn clear(&mut self) -> ClientResult<()> {
        self.lines.clear();
        self.store.clear_lines(&self.table_number)?;
        Ok(())
    }

    /// Immutable view of the current cart state
    ///
    /// Item count and total are computed from the lines on every call,
    /// never cached, so the snapshot is always consistent with the
    /// current contents.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::compute(self.table_number.clone(), self.lines.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn persist(&self) -> ClientResult<()> {
        self.store.save_lines(&self.table_number, &self.lines)?;
        Ok(())
    }
}
