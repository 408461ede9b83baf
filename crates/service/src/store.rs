//! The marketplace store service.
//!
//! `StoreService` implements every public operation by reading and
//! writing the two injected entity stores. Each operation is a single
//! read-validate-write sequence touching at most one key per write;
//! failed validation returns before any write, so a call either commits
//! its one write or leaves state untouched.
//!
//! Mutating operations hold `writes` for the whole sequence, so
//! overlapping mutations are serialized and each one observes the
//! committed state left by the previous one. Reads take no lock; they
//! see whichever committed state the store holds at lookup time.

use std::sync::Arc;

use models::{Account, Book};
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::idgen::IdGenerator;
use crate::storage::EntityStore;

/// Coordinates the book catalog and the account ledger.
///
/// Holds no entity state of its own; business rules live here,
/// durability lives in the injected stores.
#[derive(Clone)]
pub struct StoreService {
    catalog: Arc<dyn EntityStore<Book>>,
    ledger: Arc<dyn EntityStore<Account>>,
    ids: Arc<dyn IdGenerator>,
    // Serializes every mutating operation end-to-end. The stores only
    // guard individual calls, so a get-mutate-insert sequence would
    // otherwise race with a concurrent writer and drop its update.
    writes: Arc<Mutex<()>>,
}

impl StoreService {
    pub fn new(
        catalog: Arc<dyn EntityStore<Book>>,
        ledger: Arc<dyn EntityStore<Account>>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            catalog,
            ledger,
            ids,
            writes: Arc::new(Mutex::new(())),
        }
    }

    // ── catalog ──

    /// Add a book to the catalog. No price validation: zero and
    /// negative prices are stored as given.
    #[instrument(skip(self))]
    pub async fn add_book(&self, title: &str, price: i64) -> Result<Book, StoreError> {
        let _writes = self.writes.lock().await;
        let book = Book::new(self.ids.next_id(), title, price);
        self.catalog.insert(book.id, book.clone()).await?;
        info!(book_id = %book.id, "book_added");
        Ok(book)
    }

    /// Look up a book. Absence is an empty result, not an error.
    pub async fn get_book(&self, id: &Uuid) -> Result<Option<Book>, StoreError> {
        Ok(self.catalog.get(id).await?)
    }

    pub async fn get_books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.catalog.values().await?)
    }

    // ── ledger ──

    /// Create an account with an empty cart, timestamped at creation.
    #[instrument(skip(self))]
    pub async fn create_account(&self, username: &str, balance: i64) -> Result<Account, StoreError> {
        let _writes = self.writes.lock().await;
        let account = Account::new(self.ids.next_id(), username, balance);
        self.ledger.insert(account.id, account.clone()).await?;
        info!(account_id = %account.id, "account_created");
        Ok(account)
    }

    /// Remove an account and return the removed record.
    #[instrument(skip(self))]
    pub async fn remove_account(&self, id: &Uuid) -> Result<Account, StoreError> {
        let _writes = self.writes.lock().await;
        let removed = self
            .ledger
            .remove(id)
            .await?
            .ok_or(StoreError::AccountDoesNotExist(*id))?;
        info!(account_id = %id, "account_removed");
        Ok(removed)
    }

    /// Look up an account. Absence is an empty result, not an error.
    pub async fn get_account(&self, id: &Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.ledger.get(id).await?)
    }

    pub async fn get_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.ledger.values().await?)
    }

    /// Overwrite the balance. No lower bound: callers may set a
    /// negative balance here even though checkout never produces one.
    #[instrument(skip(self))]
    pub async fn update_balance(&self, id: &Uuid, balance: i64) -> Result<Account, StoreError> {
        let _writes = self.writes.lock().await;
        let mut account = self.require_account(id).await?;
        account.balance = balance;
        self.ledger.insert(account.id, account.clone()).await?;
        Ok(account)
    }

    // ── cart / checkout ──

    /// Append a book to the cart. The book must exist in the catalog at
    /// insertion time; duplicates are appended, not deduplicated.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, account_id: &Uuid, book_id: &Uuid) -> Result<Account, StoreError> {
        let _writes = self.writes.lock().await;
        let mut account = self.require_account(account_id).await?;
        self.require_book(book_id).await?;
        account.add_to_cart(*book_id);
        self.ledger.insert(account.id, account.clone()).await?;
        Ok(account)
    }

    /// Resolve the cart to book records, in cart order.
    pub async fn get_cart(&self, account_id: &Uuid) -> Result<Vec<Book>, StoreError> {
        let account = self.require_account(account_id).await?;
        let mut books = Vec::with_capacity(account.cart.len());
        for book_id in &account.cart {
            // Entries always resolve today since books are never
            // removed; a dangling entry fails the whole call.
            books.push(self.require_book(book_id).await?);
        }
        Ok(books)
    }

    /// Remove every occurrence of a book from the cart. The book must
    /// still exist in the catalog even though removal itself would not
    /// need the record.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        account_id: &Uuid,
        book_id: &Uuid,
    ) -> Result<Account, StoreError> {
        let _writes = self.writes.lock().await;
        let mut account = self.require_account(account_id).await?;
        self.require_book(book_id).await?;
        account.remove_from_cart(book_id);
        self.ledger.insert(account.id, account.clone()).await?;
        Ok(account)
    }

    /// Check out the cart.
    ///
    /// Rejects with `InsufficientBalance` (message carries the
    /// shortfall) when the balance does not cover the cart total,
    /// leaving cart and balance untouched. On success the cart is
    /// cleared and the balance stays unchanged: checkout validates
    /// funds, it does not capture them.
    #[instrument(skip(self))]
    pub async fn checkout(&self, account_id: &Uuid) -> Result<Account, StoreError> {
        let _writes = self.writes.lock().await;
        let mut account = self.require_account(account_id).await?;

        // Saturating arithmetic: prices are unvalidated i64, so an
        // absurd cart must reject cleanly rather than overflow.
        let mut total: i64 = 0;
        for book_id in &account.cart {
            total = total.saturating_add(self.require_book(book_id).await?.price);
        }

        if account.balance < total {
            let shortfall = total.saturating_sub(account.balance);
            return Err(StoreError::InsufficientBalance(format!(
                "cart total {} exceeds balance {} by {}",
                total, account.balance, shortfall
            )));
        }

        account.clear_cart();
        self.ledger.insert(account.id, account.clone()).await?;
        info!(account_id = %account.id, total, "checkout_completed");
        Ok(account)
    }

    async fn require_account(&self, id: &Uuid) -> Result<Account, StoreError> {
        self.ledger
            .get(id)
            .await?
            .ok_or(StoreError::AccountDoesNotExist(*id))
    }

    async fn require_book(&self, id: &Uuid) -> Result<Book, StoreError> {
        self.catalog
            .get(id)
            .await?
            .ok_or(StoreError::BookDoesNotExist(*id))
    }
}
