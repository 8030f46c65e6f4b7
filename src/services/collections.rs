//! Collections service
//!
//! Derives the worklist of outstanding collection obligations (credit or
//! cheque balances owed on orders) by joining orders with customers and
//! users, and performs the recognition state transition: order balance
//! zeroed, customer outstanding balance reduced, completion ledger
//! appended.

use std::collections::HashSet;

use chrono::Local;
use log::warn;

use crate::audit::{generate_diff, EntityType};
use crate::error::{OpsError, OpsResult};
use crate::models::{
    CollectionId, CollectionRecord, CollectionStatus, CollectionType, Money, Order, User,
};
use crate::storage::Storage;

/// Service for the collections workflow
pub struct CollectionsService<'a> {
    storage: &'a Storage,
}

/// Independent status/type filters over a derived worklist
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionFilter {
    pub status: Option<CollectionStatus>,
    pub collection_type: Option<CollectionType>,
}

/// Aggregate statistics over a (filtered) worklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionStats {
    /// Sum of pending amounts across both types
    pub pending_total: Money,
    /// Sum of pending credit amounts
    pub pending_credit: Money,
    /// Sum of pending cheque amounts
    pub pending_cheque: Money,
    /// Sum of completed amounts
    pub complete_total: Money,
    /// Number of records in the filtered view
    pub record_count: usize,
}

/// Result of recognizing an obligation
#[derive(Debug)]
pub struct RecognitionResult {
    /// The recognized record, now Complete
    pub record: CollectionRecord,
    /// The amount collected
    pub amount: Money,
    /// The customer's outstanding balance after the update, when the
    /// customer was still resolvable
    pub new_outstanding: Option<Money>,
}

impl<'a> CollectionsService<'a> {
    /// Create a new collections service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Check that the operator's role may manage collections
    pub fn ensure_operator(&self, operator: &User) -> OpsResult<()> {
        if operator.role.can_manage_collections() {
            Ok(())
        } else {
            Err(OpsError::AccessDenied {
                role: operator.role.to_string(),
            })
        }
    }

    /// The completion-signal set: ledger ids plus ids implied by the
    /// per-type marker tokens in order notes
    ///
    /// Ledger membership is authoritative; the note markers are a
    /// secondary signal kept for orders annotated out-of-band.
    pub fn completion_signals(&self) -> OpsResult<HashSet<CollectionId>> {
        let mut signals = self.storage.ledger.ids()?;

        for order in self.storage.orders.get_all()? {
            for collection_type in [CollectionType::Credit, CollectionType::Cheque] {
                if order.notes.contains(collection_type.completion_marker()) {
                    signals.insert(CollectionId::new(order.id, collection_type));
                }
            }
        }

        Ok(signals)
    }

    /// Derive the current worklist from orders, customers, and users
    ///
    /// Runs the full join on every call and fully replaces any previous
    /// list; there is no incremental recompute. Orders whose customer
    /// cannot be resolved are skipped with a diagnostic. The responsible
    /// user falls back to the operator when the assigned user cannot be
    /// resolved; if there is still no one to attribute collection to, the
    /// order is skipped with a diagnostic.
    pub fn derive(&self, operator: Option<&User>) -> OpsResult<Vec<CollectionRecord>> {
        let signals = self.completion_signals()?;
        let mut records = Vec::new();

        for order in self.storage.orders.get_all()? {
            let customer = match self.storage.customers.get(order.customer_id)? {
                Some(customer) => customer,
                None => {
                    warn!(
                        "skipping order {}: customer {} not found",
                        order.id, order.customer_id
                    );
                    continue;
                }
            };

            let collector_name = match self.resolve_collector(&order, operator)? {
                Some(name) => name,
                None => {
                    warn!(
                        "skipping order {}: no resolvable user to attribute collection to",
                        order.id
                    );
                    continue;
                }
            };

            // Credit and cheque balances are independent obligations on
            // the same order
            for collection_type in [CollectionType::Credit, CollectionType::Cheque] {
                let amount = match collection_type {
                    CollectionType::Credit => order.credit_balance,
                    CollectionType::Cheque => order.cheque_balance,
                };
                if !amount.is_positive() {
                    continue;
                }

                let id = CollectionId::new(order.id, collection_type);
                let status = if signals.contains(&id) {
                    CollectionStatus::Complete
                } else {
                    CollectionStatus::Pending
                };

                records.push(CollectionRecord {
                    id,
                    order_id: order.id,
                    customer_id: customer.id,
                    customer_name: customer.name.clone(),
                    collected_by: collector_name.clone(),
                    collected_at: order.date,
                    amount,
                    collection_type,
                    status,
                    notes: None,
                });
            }
        }

        // Most recent first; equal dates break ties by id ascending so
        // repeated derivations are byte-for-byte stable
        records.sort_by(|a, b| {
            b.collected_at
                .cmp(&a.collected_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(records)
    }

    /// Resolve the display name of the user responsible for an order
    fn resolve_collector(
        &self,
        order: &Order,
        operator: Option<&User>,
    ) -> OpsResult<Option<String>> {
        if let Some(user_id) = order.assigned_user_id {
            if let Some(user) = self.storage.users.get(user_id)? {
                return Ok(Some(user.name));
            }
        }
        Ok(operator.map(|u| u.name.clone()))
    }

    /// Apply status/type filters, preserving sort order
    pub fn filter(records: &[CollectionRecord], filter: CollectionFilter) -> Vec<CollectionRecord> {
        records
            .iter()
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .filter(|r| {
                filter
                    .collection_type
                    .map_or(true, |t| r.collection_type == t)
            })
            .cloned()
            .collect()
    }

    /// Compute aggregate statistics over a (filtered) worklist
    pub fn stats(records: &[CollectionRecord]) -> CollectionStats {
        let mut stats = CollectionStats {
            pending_total: Money::zero(),
            pending_credit: Money::zero(),
            pending_cheque: Money::zero(),
            complete_total: Money::zero(),
            record_count: records.len(),
        };

        for record in records {
            match record.status {
                CollectionStatus::Pending => {
                    stats.pending_total += record.amount;
                    match record.collection_type {
                        CollectionType::Credit => stats.pending_credit += record.amount,
                        CollectionType::Cheque => stats.pending_cheque += record.amount,
                    }
                }
                CollectionStatus::Complete => {
                    stats.complete_total += record.amount;
                }
            }
        }

        stats
    }

    /// Recognize a pending obligation as collected
    ///
    /// Write ordering: completion ledger first (membership is what
    /// derivation trusts), then the order balance, then the customer
    /// outstanding balance, then a reload of the join inputs. Failures
    /// mid-sequence are not rolled back; the next derivation reconciles
    /// against whatever landed.
    pub fn recognize(
        &self,
        record: &CollectionRecord,
        verification_notes: Option<&str>,
        operator: &User,
    ) -> OpsResult<RecognitionResult> {
        self.ensure_operator(operator)?;

        if !record.is_pending() {
            return Err(OpsError::Collection(format!(
                "Collection {} is already complete",
                record.id
            )));
        }

        // 1. Ledger append, persisted immediately
        self.storage.ledger.append(record.id)?;

        // 2. Zero the matching order balance and append the audit line
        let mut order = self
            .storage
            .orders
            .get(record.order_id)?
            .ok_or_else(|| OpsError::order_not_found(record.order_id.to_string()))?;
        let order_before = order.clone();

        match record.collection_type {
            CollectionType::Credit => order.credit_balance = Money::zero(),
            CollectionType::Cheque => order.cheque_balance = Money::zero(),
        }
        order.append_note(&build_audit_note(record, verification_notes, operator));

        self.storage.orders.upsert(order.clone())?;
        self.storage.orders.save()?;

        let diff = generate_diff(
            &serde_json::to_value(&order_before)?,
            &serde_json::to_value(&order)?,
        );
        self.storage.log_update(
            EntityType::Order,
            order.id.to_string(),
            Some(order.customer_name.clone()),
            &order_before,
            &order,
            diff,
        )?;

        // 3. Reduce the customer's outstanding balance, floored at zero
        let new_outstanding = match self.storage.customers.get(record.customer_id)? {
            Some(mut customer) => {
                let customer_before = customer.clone();
                customer.outstanding_balance =
                    customer.outstanding_balance.sub_or_zero(record.amount);

                self.storage.customers.upsert(customer.clone())?;
                self.storage.customers.save()?;

                self.storage.log_update(
                    EntityType::Customer,
                    customer.id.to_string(),
                    Some(customer.name.clone()),
                    &customer_before,
                    &customer,
                    Some(format!(
                        "outstanding_balance: {} -> {}",
                        customer_before.outstanding_balance, customer.outstanding_balance
                    )),
                )?;

                Some(customer.outstanding_balance)
            }
            None => {
                warn!(
                    "customer {} not found while recognizing {}; outstanding balance not adjusted",
                    record.customer_id, record.id
                );
                None
            }
        };

        // 4. Optimistic local flip, then reconcile against the store
        let mut completed = record.clone();
        completed.mark_complete();
        completed.notes = verification_notes.map(|s| s.to_string());

        self.storage.log_create(
            EntityType::Collection,
            completed.id.to_string(),
            Some(completed.customer_name.clone()),
            &completed,
        )?;

        self.storage.reload_collections_inputs()?;

        Ok(RecognitionResult {
            amount: completed.amount,
            record: completed,
            new_outstanding,
        })
    }
}

/// Render the audit line appended to the order's notes
///
/// Carries the per-type completion marker so the note itself doubles as a
/// completion signal.
fn build_audit_note(
    record: &CollectionRecord,
    verification_notes: Option<&str>,
    operator: &User,
) -> String {
    let mut line = format!(
        "{} {} by {} on {}",
        record.collection_type.completion_marker(),
        record.amount,
        operator.name,
        Local::now().date_naive()
    );
    if let Some(notes) = verification_notes {
        if !notes.trim().is_empty() {
            line.push_str(" - ");
            line.push_str(notes.trim());
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OpsPaths;
    use crate::models::{Customer, Role};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = OpsPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn manager(storage: &Storage) -> User {
        let user = User::new("Priya", "priya@example.com", Role::Manager);
        storage.users.upsert(user.clone()).unwrap();
        storage.users.save().unwrap();
        user
    }

    fn customer_with_balance(storage: &Storage, name: &str, outstanding: i64) -> Customer {
        let mut customer = Customer::new(name);
        customer.outstanding_balance = Money::from_cents(outstanding);
        storage.customers.upsert(customer.clone()).unwrap();
        storage.customers.save().unwrap();
        customer
    }

    fn order_with_balances(
        storage: &Storage,
        customer: &Customer,
        day: u32,
        credit: i64,
        cheque: i64,
    ) -> Order {
        let mut order = Order::new(
            customer.id,
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            Money::from_cents(credit + cheque),
        );
        order.customer_name = customer.name.clone();
        order.credit_balance = Money::from_cents(credit);
        order.cheque_balance = Money::from_cents(cheque);
        storage.orders.upsert(order.clone()).unwrap();
        storage.orders.save().unwrap();
        order
    }

    #[test]
    fn test_credit_only_order_yields_single_credit_record() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 10000);
        let order = order_with_balances(&storage, &customer, 10, 10000, 0);

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, CollectionId::new(order.id, CollectionType::Credit));
        assert_eq!(record.amount.cents(), 10000);
        assert_eq!(record.status, CollectionStatus::Pending);
        assert_eq!(record.collected_by, "Priya");
    }

    #[test]
    fn test_both_balances_yield_independent_records() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 15000);
        let order = order_with_balances(&storage, &customer, 10, 10000, 5000);

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();

        assert_eq!(records.len(), 2);
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert!(ids.contains(&CollectionId::new(order.id, CollectionType::Credit)));
        assert!(ids.contains(&CollectionId::new(order.id, CollectionType::Cheque)));
    }

    #[test]
    fn test_unresolvable_customer_skips_order() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);

        // Order pointing at a customer that was never stored
        let ghost = Customer::new("Ghost");
        order_with_balances(&storage, &ghost, 10, 10000, 0);

        let customer = customer_with_balance(&storage, "Corner Dairy", 5000);
        order_with_balances(&storage, &customer, 11, 5000, 0);

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].customer_name, "Corner Dairy");
    }

    #[test]
    fn test_no_operator_and_no_assigned_user_skips_order() {
        let (_temp_dir, storage) = create_test_storage();
        let customer = customer_with_balance(&storage, "Corner Dairy", 5000);
        order_with_balances(&storage, &customer, 10, 5000, 0);

        let service = CollectionsService::new(&storage);
        let records = service.derive(None).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_assigned_user_preferred_over_operator() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let driver = User::new("Devon", "devon@example.com", Role::Driver);
        storage.users.upsert(driver.clone()).unwrap();
        storage.users.save().unwrap();

        let customer = customer_with_balance(&storage, "Corner Dairy", 5000);
        let mut order = order_with_balances(&storage, &customer, 10, 5000, 0);
        order.assigned_user_id = Some(driver.id);
        storage.orders.upsert(order).unwrap();
        storage.orders.save().unwrap();

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();
        assert_eq!(records[0].collected_by, "Devon");
    }

    #[test]
    fn test_ledger_signal_marks_record_complete() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 10000);
        let order = order_with_balances(&storage, &customer, 10, 10000, 0);

        storage
            .ledger
            .append(CollectionId::new(order.id, CollectionType::Credit))
            .unwrap();

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();
        assert_eq!(records[0].status, CollectionStatus::Complete);
    }

    #[test]
    fn test_note_marker_signal_marks_record_complete() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 10000);
        let mut order = order_with_balances(&storage, &customer, 10, 10000, 0);
        order.append_note("[credit collected] $100.00 by Priya on 2025-03-09");
        storage.orders.upsert(order).unwrap();
        storage.orders.save().unwrap();

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();
        assert_eq!(records[0].status, CollectionStatus::Complete);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 15000);
        order_with_balances(&storage, &customer, 10, 10000, 5000);
        order_with_balances(&storage, &customer, 12, 2500, 0);

        let service = CollectionsService::new(&storage);
        let first = service.derive(Some(&operator)).unwrap();
        let second = service.derive(Some(&operator)).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.amount, b.amount);
            assert_eq!(a.status, b.status);
        }
    }

    #[test]
    fn test_sorted_by_date_descending_with_id_tiebreak() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 30000);
        order_with_balances(&storage, &customer, 9, 1000, 0);
        order_with_balances(&storage, &customer, 12, 2000, 2000);
        order_with_balances(&storage, &customer, 12, 3000, 0);

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();

        assert_eq!(records.len(), 4);
        // Dates never increase
        for pair in records.windows(2) {
            assert!(pair[0].collected_at >= pair[1].collected_at);
            if pair[0].collected_at == pair[1].collected_at {
                assert!(pair[0].id < pair[1].id);
            }
        }
        assert_eq!(
            records.last().unwrap().collected_at,
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        );
    }

    #[test]
    fn test_filter_by_status_and_type() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 100000);

        // 3 credit-pending
        order_with_balances(&storage, &customer, 10, 1000, 0);
        order_with_balances(&storage, &customer, 11, 2000, 0);
        order_with_balances(&storage, &customer, 12, 3000, 0);
        // 2 cheque-pending
        order_with_balances(&storage, &customer, 13, 0, 4000);
        order_with_balances(&storage, &customer, 14, 0, 5000);
        // 1 cheque-complete
        let completed = order_with_balances(&storage, &customer, 15, 0, 6000);
        storage
            .ledger
            .append(CollectionId::new(completed.id, CollectionType::Cheque))
            .unwrap();

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();
        assert_eq!(records.len(), 6);

        let filtered = CollectionsService::filter(
            &records,
            CollectionFilter {
                status: Some(CollectionStatus::Pending),
                collection_type: Some(CollectionType::Cheque),
            },
        );

        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .iter()
            .all(|r| r.collection_type == CollectionType::Cheque && r.is_pending()));
        assert!(filtered[0].collected_at >= filtered[1].collected_at);
    }

    #[test]
    fn test_stats_split_pending_by_type() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 100000);

        order_with_balances(&storage, &customer, 10, 1000, 0);
        order_with_balances(&storage, &customer, 11, 0, 4000);
        let completed = order_with_balances(&storage, &customer, 12, 2000, 0);
        storage
            .ledger
            .append(CollectionId::new(completed.id, CollectionType::Credit))
            .unwrap();

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();
        let stats = CollectionsService::stats(&records);

        assert_eq!(stats.pending_total.cents(), 5000);
        assert_eq!(stats.pending_credit.cents(), 1000);
        assert_eq!(stats.pending_cheque.cents(), 4000);
        assert_eq!(stats.complete_total.cents(), 2000);
        assert_eq!(stats.record_count, 3);
    }

    #[test]
    fn test_recognize_full_transition() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 10000);
        let order = order_with_balances(&storage, &customer, 10, 10000, 0);

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();
        let record = &records[0];

        let result = service
            .recognize(record, Some("verified against receipt book"), &operator)
            .unwrap();

        assert_eq!(result.record.status, CollectionStatus::Complete);
        assert_eq!(result.amount.cents(), 10000);
        assert_eq!(result.new_outstanding.unwrap(), Money::zero());

        // Order balance zeroed, audit line appended with the marker
        let updated_order = storage.orders.get(order.id).unwrap().unwrap();
        assert!(updated_order.credit_balance.is_zero());
        assert!(updated_order
            .notes
            .contains(CollectionType::Credit.completion_marker()));
        assert!(updated_order.notes.contains("verified against receipt book"));

        // Ledger carries the id
        assert!(storage.ledger.contains(record.id).unwrap());

        // Customer outstanding reduced
        let updated_customer = storage.customers.get(customer.id).unwrap().unwrap();
        assert!(updated_customer.outstanding_balance.is_zero());

        // Re-derivation no longer produces a pending record for that id
        let after = service.derive(Some(&operator)).unwrap();
        assert!(!after.iter().any(|r| r.id == record.id && r.is_pending()));
    }

    #[test]
    fn test_recognize_floors_outstanding_at_zero() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        // Outstanding 50, recognizing 80
        let customer = customer_with_balance(&storage, "Corner Dairy", 5000);
        order_with_balances(&storage, &customer, 10, 8000, 0);

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();

        let result = service.recognize(&records[0], None, &operator).unwrap();
        assert_eq!(result.new_outstanding.unwrap(), Money::zero());

        let updated = storage.customers.get(customer.id).unwrap().unwrap();
        assert!(!updated.outstanding_balance.is_negative());
        assert!(updated.outstanding_balance.is_zero());
    }

    #[test]
    fn test_recognize_preserves_existing_notes() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 20000);
        let mut order = order_with_balances(&storage, &customer, 10, 10000, 10000);
        order.append_note("deliver before 8am");
        storage.orders.upsert(order.clone()).unwrap();
        storage.orders.save().unwrap();

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();

        let credit = records
            .iter()
            .find(|r| r.collection_type == CollectionType::Credit)
            .unwrap();
        service.recognize(credit, None, &operator).unwrap();

        // Second recognition on the same order's cheque side appends too
        let records = service.derive(Some(&operator)).unwrap();
        let cheque = records
            .iter()
            .find(|r| r.collection_type == CollectionType::Cheque && r.is_pending())
            .unwrap();
        service.recognize(cheque, None, &operator).unwrap();

        let updated = storage.orders.get(order.id).unwrap().unwrap();
        assert!(updated.notes.contains("deliver before 8am"));
        assert!(updated
            .notes
            .contains(CollectionType::Credit.completion_marker()));
        assert!(updated
            .notes
            .contains(CollectionType::Cheque.completion_marker()));
    }

    #[test]
    fn test_recognize_rejects_unprivileged_roles() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let driver = User::new("Devon", "devon@example.com", Role::Driver);
        let customer = customer_with_balance(&storage, "Corner Dairy", 10000);
        order_with_balances(&storage, &customer, 10, 10000, 0);

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();

        let result = service.recognize(&records[0], None, &driver);
        assert!(matches!(result, Err(OpsError::AccessDenied { .. })));

        // Nothing was written
        assert!(!storage.ledger.contains(records[0].id).unwrap());
    }

    #[test]
    fn test_recognize_rejects_completed_record() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 10000);
        order_with_balances(&storage, &customer, 10, 10000, 0);

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();
        let result = service.recognize(&records[0], None, &operator).unwrap();

        let again = service.recognize(&result.record, None, &operator);
        assert!(matches!(again, Err(OpsError::Collection(_))));
    }

    #[test]
    fn test_recognize_with_vanished_customer_still_completes() {
        let (_temp_dir, storage) = create_test_storage();
        let operator = manager(&storage);
        let customer = customer_with_balance(&storage, "Corner Dairy", 10000);
        let order = order_with_balances(&storage, &customer, 10, 10000, 0);

        let service = CollectionsService::new(&storage);
        let records = service.derive(Some(&operator)).unwrap();

        // Customer disappears between derivation and recognition
        storage.customers.delete(customer.id).unwrap();
        storage.customers.save().unwrap();

        let result = service.recognize(&records[0], None, &operator).unwrap();
        assert!(result.new_outstanding.is_none());
        assert!(storage.ledger.contains(records[0].id).unwrap());
        let updated_order = storage.orders.get(order.id).unwrap().unwrap();
        assert!(updated_order.credit_balance.is_zero());
    }
}
