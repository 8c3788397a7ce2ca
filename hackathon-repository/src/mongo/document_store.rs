//! MongoDB implementation of the document store.

use async_trait::async_trait;
use hackathon_shared::analytics::WorkshopAnalyticsRow;
use hackathon_shared::documents::{
    EVENTS_COLLECTION, LEGACY_COLLECTIONS, PARTICIPANTS_COLLECTION, SUBMISSIONS_COLLECTION,
};
use hackathon_shared::{
    DocumentSet, DocumentStoreStats, EmbeddedWorkshop, EventDocument, EventWorkshopCount,
    IndexInfo, ParticipantDocument, SubmissionDocument, WorkshopChanges, WorkshopDetails,
};
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::errors::DocumentStoreError;
use crate::interfaces::{DocumentStore, WorkshopRemoval};

/// Index on the skill level of embedded workshops.
pub const SKILL_LEVEL_INDEX: &str = "idx_workshops_skill_level";
/// Index on event start dates.
pub const START_DATE_INDEX: &str = "idx_events_start_date";

/// MongoDB implementation of `DocumentStore`.
pub struct MongoDocumentStore {
    database: Database,
    participants: Collection<ParticipantDocument>,
    events: Collection<EventDocument>,
    submissions: Collection<SubmissionDocument>,
}

impl MongoDocumentStore {
    /// Create a new document store on `database_name`.
    pub fn new(client: &Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Self {
            participants: database.collection(PARTICIPANTS_COLLECTION),
            events: database.collection(EVENTS_COLLECTION),
            submissions: database.collection(SUBMISSIONS_COLLECTION),
            database,
        }
    }

    /// Get the database reference.
    pub fn database(&self) -> &Database {
        &self.database
    }

    async fn aggregate_events<T: DeserializeOwned>(
        &self,
        pipeline: Vec<Document>,
    ) -> Result<Vec<T>, DocumentStoreError> {
        let mut cursor = self.events.aggregate(pipeline).await?;

        let mut results = Vec::new();
        while cursor.advance().await? {
            let document = cursor.deserialize_current()?;
            results.push(bson::from_document(document)?);
        }
        Ok(results)
    }
}

/// Pipeline flattening embedded workshops with their event and venue.
fn workshop_analytics_pipeline(skill_level: Option<&str>) -> Vec<Document> {
    let mut pipeline = vec![doc! {
        "$unwind": { "path": "$workshops", "preserveNullAndEmptyArrays": false }
    }];

    if let Some(level) = skill_level {
        pipeline.push(doc! { "$match": { "workshops.skill_level": level } });
    }

    pipeline.push(doc! {
        "$project": {
            "_id": 0,
            "workshop_number": "$workshops.workshop_number",
            "event_id": "$_id",
            "workshop_title": "$workshops.title",
            "workshop_description": "$workshops.description",
            "duration": "$workshops.duration",
            "skill_level": "$workshops.skill_level",
            "max_attendees": "$workshops.max_attendees",
            "event_name": "$name",
            "event_type": "$event_type",
            "start_date": "$start_date",
            "end_date": "$end_date",
            "event_max_participants": "$max_participants",
            "venue_id": "$venue.venue_id",
            "venue_name": "$venue.name",
            "venue_address": "$venue.address",
            "venue_capacity": "$venue.capacity",
            "venue_facilities": "$venue.facilities",
        }
    });
    pipeline.push(doc! { "$sort": { "start_date": 1, "workshop_number": 1 } });
    pipeline
}

/// `$set` document for a positional update of one embedded workshop.
fn workshop_set_document(changes: &WorkshopChanges) -> Document {
    let mut set = doc! { "workshops.$.title": &changes.title };
    if let Some(description) = &changes.description {
        set.insert("workshops.$.description", description);
    }
    if let Some(duration) = changes.duration {
        set.insert("workshops.$.duration", duration);
    }
    if let Some(skill_level) = &changes.skill_level {
        set.insert("workshops.$.skill_level", skill_level);
    }
    if let Some(max_attendees) = changes.max_attendees {
        set.insert("workshops.$.max_attendees", max_attendees);
    }
    set
}

fn bson_to_u64(value: Option<&Bson>) -> u64 {
    match value {
        Some(Bson::Int32(n)) => (*n).max(0) as u64,
        Some(Bson::Int64(n)) => (*n).max(0) as u64,
        _ => 0,
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn ping(&self) -> Result<(), DocumentStoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn replace_collections(&self, documents: &DocumentSet) -> Result<(), DocumentStoreError> {
        self.participants.delete_many(doc! {}).await?;
        self.events.delete_many(doc! {}).await?;
        self.submissions.delete_many(doc! {}).await?;

        for name in LEGACY_COLLECTIONS {
            // Dropping a collection that does not exist is not an error here.
            if let Err(e) = self.database.collection::<Document>(name).drop().await {
                debug!(collection = name, error = %e, "Legacy collection not dropped");
            }
        }

        if !documents.participants.is_empty() {
            self.participants.insert_many(&documents.participants).await?;
        }
        if !documents.events.is_empty() {
            self.events.insert_many(&documents.events).await?;
        }
        if !documents.submissions.is_empty() {
            self.submissions.insert_many(&documents.submissions).await?;
        }

        info!(
            participants = documents.participants.len(),
            events = documents.events.len(),
            submissions = documents.submissions.len(),
            "Replaced document collections"
        );
        Ok(())
    }

    async fn stats(&self) -> Result<DocumentStoreStats, DocumentStoreError> {
        let participants = self.participants.count_documents(doc! {}).await?;
        let events = self.events.count_documents(doc! {}).await?;
        let submissions = self.submissions.count_documents(doc! {}).await?;

        let counted: Vec<Document> = self
            .aggregate_events(vec![
                doc! { "$unwind": "$workshops" },
                doc! { "$count": "total" },
            ])
            .await?;
        let workshops = bson_to_u64(counted.first().and_then(|d| d.get("total")));

        Ok(DocumentStoreStats {
            participants,
            events,
            submissions,
            workshops,
        })
    }

    async fn find_event(&self, event_id: i32) -> Result<Option<EventDocument>, DocumentStoreError> {
        Ok(self.events.find_one(doc! { "_id": event_id }).await?)
    }

    async fn list_workshops(&self) -> Result<Vec<WorkshopDetails>, DocumentStoreError> {
        self.aggregate_events(vec![
            doc! { "$unwind": "$workshops" },
            doc! {
                "$project": {
                    "_id": 0,
                    "workshop_number": "$workshops.workshop_number",
                    "event_id": "$_id",
                    "title": "$workshops.title",
                    "description": "$workshops.description",
                    "duration": "$workshops.duration",
                    "skill_level": "$workshops.skill_level",
                    "max_attendees": "$workshops.max_attendees",
                    "event_name": "$name",
                    "start_date": "$start_date",
                    "end_date": "$end_date",
                    "venue_name": "$venue.name",
                    "venue_address": "$venue.address",
                }
            },
            doc! { "$sort": { "start_date": 1, "event_id": 1, "workshop_number": 1 } },
        ])
        .await
    }

    async fn list_events_with_workshop_counts(
        &self,
    ) -> Result<Vec<EventWorkshopCount>, DocumentStoreError> {
        self.aggregate_events(vec![
            doc! {
                "$project": {
                    "_id": 0,
                    "event_id": "$_id",
                    "name": 1,
                    "start_date": 1,
                    "end_date": 1,
                    "workshop_count": { "$size": { "$ifNull": ["$workshops", []] } },
                }
            },
            doc! { "$sort": { "start_date": 1 } },
        ])
        .await
    }

    async fn push_workshop(
        &self,
        event_id: i32,
        workshop: &EmbeddedWorkshop,
    ) -> Result<bool, DocumentStoreError> {
        let workshop = bson::to_bson(workshop)?;
        let number = workshop
            .as_document()
            .and_then(|d| d.get("workshop_number"))
            .cloned()
            .unwrap_or(Bson::Null);

        let result = self
            .events
            .update_one(
                doc! { "_id": event_id, "workshops.workshop_number": { "$ne": number } },
                doc! { "$push": { "workshops": workshop } },
            )
            .await?;

        Ok(result.modified_count > 0)
    }

    async fn update_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
        changes: &WorkshopChanges,
    ) -> Result<bool, DocumentStoreError> {
        let result = self
            .events
            .update_one(
                doc! { "_id": event_id, "workshops.workshop_number": workshop_number },
                doc! { "$set": workshop_set_document(changes) },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn pull_workshop(
        &self,
        event_id: i32,
        workshop_number: i32,
    ) -> Result<WorkshopRemoval, DocumentStoreError> {
        let result = self
            .events
            .update_one(
                doc! { "_id": event_id },
                doc! { "$pull": { "workshops": { "workshop_number": workshop_number } } },
            )
            .await?;

        Ok(if result.matched_count == 0 {
            WorkshopRemoval::EventNotFound
        } else if result.modified_count == 0 {
            WorkshopRemoval::WorkshopNotFound
        } else {
            WorkshopRemoval::Removed
        })
    }

    async fn create_indexes(&self) -> Result<Vec<String>, DocumentStoreError> {
        let skill_index = IndexModel::builder()
            .keys(doc! { "workshops.skill_level": 1 })
            .options(IndexOptions::builder().name(SKILL_LEVEL_INDEX.to_string()).build())
            .build();
        let start_date_index = IndexModel::builder()
            .keys(doc! { "start_date": 1 })
            .options(IndexOptions::builder().name(START_DATE_INDEX.to_string()).build())
            .build();

        let mut created = Vec::new();
        for index in [skill_index, start_date_index] {
            let result = self.events.create_index(index).await?;
            created.push(result.index_name);
        }

        info!(indexes = ?created, "Created document store indexes");
        Ok(created)
    }

    async fn list_indexes(&self) -> Result<Vec<IndexInfo>, DocumentStoreError> {
        let mut indexes = Vec::new();
        for name in [PARTICIPANTS_COLLECTION, EVENTS_COLLECTION, SUBMISSIONS_COLLECTION] {
            let mut cursor = self.database.collection::<Document>(name).list_indexes().await?;
            while cursor.advance().await? {
                let model = cursor.deserialize_current()?;
                indexes.push(IndexInfo {
                    collection: name.to_string(),
                    name: model
                        .options
                        .as_ref()
                        .and_then(|o| o.name.clone())
                        .unwrap_or_default(),
                    keys: serde_json::to_value(&model.keys).unwrap_or(serde_json::Value::Null),
                });
            }
        }
        Ok(indexes)
    }

    async fn workshop_analytics(
        &self,
        skill_level: Option<&str>,
    ) -> Result<Vec<WorkshopAnalyticsRow>, DocumentStoreError> {
        self.aggregate_events(workshop_analytics_pipeline(skill_level))
            .await
    }

    async fn explain_workshop_analytics(
        &self,
        skill_level: Option<&str>,
    ) -> Result<serde_json::Value, DocumentStoreError> {
        let command = doc! {
            "explain": {
                "aggregate": EVENTS_COLLECTION,
                "pipeline": workshop_analytics_pipeline(skill_level),
                "cursor": {},
            },
            "verbosity": "executionStats",
        };
        let explained = self.database.run_command(command).await?;
        Ok(serde_json::to_value(&explained).unwrap_or(serde_json::Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_pipeline_without_filter_has_no_match_stage() {
        let pipeline = workshop_analytics_pipeline(None);
        assert_eq!(pipeline.len(), 3);
        assert!(pipeline.iter().all(|stage| !stage.contains_key("$match")));
    }

    #[test]
    fn test_analytics_pipeline_filters_on_skill_level() {
        let pipeline = workshop_analytics_pipeline(Some("Advanced"));
        let stage = pipeline[1].get_document("$match").unwrap();
        assert_eq!(stage.get_str("workshops.skill_level").unwrap(), "Advanced");
    }

    #[test]
    fn test_set_document_only_touches_provided_fields() {
        let changes = WorkshopChanges {
            title: "Intro to Rust".to_string(),
            description: None,
            duration: Some(90),
            skill_level: None,
            max_attendees: None,
        };

        let set = workshop_set_document(&changes);
        assert_eq!(set.get_str("workshops.$.title").unwrap(), "Intro to Rust");
        assert_eq!(set.get_i32("workshops.$.duration").unwrap(), 90);
        assert!(!set.contains_key("workshops.$.description"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_count_conversion_accepts_both_integer_widths() {
        assert_eq!(bson_to_u64(Some(&Bson::Int32(7))), 7);
        assert_eq!(bson_to_u64(Some(&Bson::Int64(9))), 9);
        assert_eq!(bson_to_u64(None), 0);
    }
}
