use crate::catalog::CollectionSpec;
use crate::collection;
use crate::collection::Record;
use crate::ports::RemoteStore;
use crate::ports::StoreError;

/// A mutation against the in-memory list. Every applied mutation triggers a
/// full-document resync; the store knows no finer write granularity.
pub(crate) enum Mutation {
    Insert(Record),
    Update { id: u64, patch: Record },
    Remove { id: u64 },
}

/// Binds one catalog entry to the remote store port: fetch + normalize on
/// the way in, wrap + overwrite on the way out.
pub(crate) struct CollectionClient<'a, S> {
    store: &'a S,
    spec: &'static CollectionSpec,
}

impl<'a, S: RemoteStore> CollectionClient<'a, S> {
    pub(crate) fn new(store: &'a S, spec: &'static CollectionSpec) -> Self {
        Self { store, spec }
    }

    /// Fetches the collection document and normalizes it to a record list.
    /// Absence of data is an empty list, never an error.
    pub(crate) async fn load(&self) -> Result<Vec<Record>, StoreError> {
        let payload = self.store.fetch_document(self.spec.resource).await?;
        Ok(collection::extract_records(&payload, self.spec.field_key))
    }

    /// Serializes the entire list under the original document shape and
    /// replaces the remote collection with it.
    pub(crate) async fn sync(&self, records: &[Record]) -> Result<(), StoreError> {
        let document =
            collection::wrap_document(self.spec.resource, self.spec.field_key, records);
        self.store.put_document(self.spec.resource, &document).await
    }

    /// Applies the mutation to the list, then resyncs. Returns the touched
    /// record id, or `None` when the mutation matched nothing (in which case
    /// no write is issued — the list did not change). A failed resync does
    /// NOT roll the list back; the caller surfaces the error and the next
    /// page load refetches.
    pub(crate) async fn apply(
        &self,
        records: &mut Vec<Record>,
        mutation: Mutation,
    ) -> Result<Option<u64>, StoreError> {
        let touched = match mutation {
            Mutation::Insert(record) => Some(collection::insert(records, record)),
            Mutation::Update { id, patch } => collection::update(records, id, patch).then_some(id),
            Mutation::Remove { id } => collection::remove(records, id).then_some(id),
        };
        if touched.is_some() {
            self.sync(records).await?;
        }
        Ok(touched)
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::testing::FakeStore;
    use serde_json::Value;
    use serde_json::json;

    fn record(value: Value) -> Record {
        let Value::Object(fields) = value else {
            unreachable!()
        };
        fields
    }

    #[tokio::test]
    async fn load__should_normalize_wrapped_document() {
        // Given
        let store = FakeStore::default().with_document(
            catalog::FEATURES.resource,
            json!([{ "id": 6, "features": [{ "id": 1, "name": "Wifi" }] }]),
        );
        let client = CollectionClient::new(&store, &catalog::FEATURES);

        // When
        let records = client.load().await.expect("load");

        // Then
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("name"), Some(&json!("Wifi")));
    }

    #[tokio::test]
    async fn load__should_surface_fetch_status() {
        // Given
        let store = FakeStore::default();
        let client = CollectionClient::new(&store, &catalog::FEATURES);

        // When
        let outcome = client.load().await;

        // Then
        assert!(matches!(outcome, Err(StoreError::FetchStatus(404))));
    }

    #[tokio::test]
    async fn apply__should_insert_and_overwrite_whole_document() {
        // Given
        let store = FakeStore::default().with_document(
            catalog::FEATURES.resource,
            json!({ "id": 6, "features": [{ "id": 2, "name": "Wifi" }] }),
        );
        let client = CollectionClient::new(&store, &catalog::FEATURES);
        let mut records = client.load().await.expect("load");

        // When
        let touched = client
            .apply(&mut records, Mutation::Insert(record(json!({ "name": "Pool" }))))
            .await
            .expect("apply");

        // Then
        assert_eq!(touched, Some(3));
        let document = store.document(catalog::FEATURES.resource).expect("doc");
        assert_eq!(
            document,
            json!({ "id": 6, "features": [
                { "id": 2, "name": "Wifi" },
                { "id": 3, "name": "Pool" }
            ]})
        );
    }

    #[tokio::test]
    async fn apply__should_skip_write_when_update_matches_nothing() {
        // Given
        let seeded = json!({ "id": 6, "features": [{ "id": 1, "name": "Wifi" }] });
        let store = FakeStore::default().with_document(catalog::FEATURES.resource, seeded.clone());
        let client = CollectionClient::new(&store, &catalog::FEATURES);
        let mut records = client.load().await.expect("load");

        // When
        let touched = client
            .apply(
                &mut records,
                Mutation::Update {
                    id: 99,
                    patch: Record::new(),
                },
            )
            .await
            .expect("apply");

        // Then
        assert_eq!(touched, None);
        assert_eq!(store.put_count(), 0);
        assert_eq!(store.document(catalog::FEATURES.resource), Some(seeded));
    }

    #[tokio::test]
    async fn apply__should_not_roll_back_on_failed_write() {
        // Given
        let store = FakeStore::default()
            .with_document(catalog::FEATURES.resource, json!({ "id": 6, "features": [] }));
        store.fail_writes(true);
        let client = CollectionClient::new(&store, &catalog::FEATURES);
        let mut records = client.load().await.expect("load");

        // When
        let outcome = client
            .apply(&mut records, Mutation::Insert(record(json!({ "name": "Spa" }))))
            .await;

        // Then
        assert!(matches!(outcome, Err(StoreError::WriteStatus(500))));
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn apply__should_remove_by_id_and_resync() {
        // Given
        let store = FakeStore::default().with_document(
            catalog::BOOKINGS.resource,
            json!({ "id": 3, "bookings": [{ "id": 1 }, { "id": 2 }] }),
        );
        let client = CollectionClient::new(&store, &catalog::BOOKINGS);
        let mut records = client.load().await.expect("load");

        // When
        client
            .apply(&mut records, Mutation::Remove { id: 1 })
            .await
            .expect("apply");

        // Then
        let reloaded = client.load().await.expect("reload");
        assert_eq!(reloaded.len(), 1);
        assert!(collection::find_record(&reloaded, 1).is_none());
    }
}
