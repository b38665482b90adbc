//! A client for the documents endpoints of the Cloud Firestore REST API.

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::stores::StoreError;

/// A document read from Firestore: its full resource name and its fields.
///
/// Fields are kept as raw Firestore value objects; the typed accessors
/// return `None` for fields that are missing or of the wrong kind so that
/// callers decide how strict to be.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// The full resource name, ending in the document ID.
    pub name: String,
    /// The document's fields as Firestore value objects, e.g.
    /// `{"title": {"stringValue": "Groceries"}}`.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// The ID under which the store filed this document (the last segment of
    /// its resource name).
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Read a string field, or `None` if the field is missing or not a
    /// string.
    pub fn string_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field)?.get("stringValue")?.as_str()
    }

    /// Read a numeric field, or `None` if the field is missing or not
    /// numeric.
    ///
    /// Whole numbers written by other clients may arrive as integer values,
    /// so those are accepted alongside doubles.
    pub fn double_field(&self, field: &str) -> Option<f64> {
        let value = self.fields.get(field)?;

        if let Some(double) = value.get("doubleValue").and_then(Value::as_f64) {
            return Some(double);
        }

        // Firestore serialises 64 bit integers as JSON strings.
        let integer = value.get("integerValue")?;
        if let Some(text) = integer.as_str() {
            return text.parse().ok();
        }

        integer.as_f64()
    }
}

/// Encode a string as a Firestore value object.
pub fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

/// Encode a float as a Firestore value object.
pub fn double_value(value: f64) -> Value {
    json!({ "doubleValue": value })
}

/// Talks to the documents endpoints of one Firestore database over REST.
///
/// The domain stores wrap this client with the collection names and field
/// codecs for their models.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    client: Client,
    base_url: String,
}

impl FirestoreClient {
    /// Create a client for the default database of `project_id`.
    ///
    /// `client` should have a request timeout set, e.g. via
    /// [build_http_client](super::build_http_client).
    pub fn new(client: Client, project_id: &str) -> Self {
        let base_url = format!(
            "https://firestore.googleapis.com/v1/projects/{project_id}/databases/(default)/documents"
        );

        Self { client, base_url }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.base_url)
    }

    /// Create a document with a store-assigned ID and return that ID.
    pub async fn create(&self, collection: &str, fields: Value) -> Result<String, StoreError> {
        let url = format!("{}/{collection}", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let document: Document = response.json().await?;

        Ok(document.id().to_owned())
    }

    /// Create or replace the document at `id`.
    pub async fn set(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.document_url(collection, id))
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        check_status(response).await?;

        Ok(())
    }

    /// Fetch the document at `id`, or `None` if no such document exists.
    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = check_status(response).await?;
        let document = response.json().await?;

        Ok(Some(document))
    }

    /// Fetch every document in `collection` whose `field` equals the string
    /// `value`, in the order the store returns them.
    pub async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}:runQuery", self.base_url);
        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": string_value(value),
                    }
                }
            }
        });

        let response = self.client.post(&url).json(&query).send().await?;
        let response = check_status(response).await?;
        let results: Vec<QueryResult> = response.json().await?;

        Ok(results
            .into_iter()
            .filter_map(|result| result.document)
            .collect())
    }

    /// Delete the document at `id`.
    ///
    /// The request carries an exists precondition, so deleting a document
    /// that is not in the store reports [StoreError::NotFound] instead of
    /// succeeding silently.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = format!(
            "{}?currentDocument.exists=true",
            self.document_url(collection, id)
        );

        let response = self.client.delete(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::NOT_FOUND || status == StatusCode::CONFLICT {
            return Err(StoreError::NotFound);
        }

        let detail = read_error_detail(response).await;

        // Some API revisions report the failed exists precondition as 400.
        if status == StatusCode::BAD_REQUEST && detail.contains("FAILED_PRECONDITION") {
            return Err(StoreError::NotFound);
        }

        Err(StoreError::Backend(format!(
            "HTTP {}: {detail}",
            status.as_u16()
        )))
    }
}

/// A single entry in a `runQuery` response. Entries that only carry a read
/// time have no document.
#[derive(Debug, Deserialize)]
struct QueryResult {
    document: Option<Document>,
}

/// Pass a successful response through, or turn the error body into a
/// [StoreError::Backend].
async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    Err(StoreError::Backend(format!(
        "HTTP {}: {}",
        status.as_u16(),
        read_error_detail(response).await
    )))
}

/// Read the status and message out of a Firestore error response body.
async fn read_error_detail(response: Response) -> String {
    #[derive(Deserialize)]
    struct ErrorResponse {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        status: String,
        #[serde(default)]
        message: String,
    }

    match response.json::<ErrorResponse>().await {
        Ok(body) => format!("{}: {}", body.error.status, body.error.message),
        Err(_) => "<no error body>".to_owned(),
    }
}
