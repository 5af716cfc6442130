//! MCP server implementation for stratus
//!
//! Exposes the storage operations as named MCP tools over stdio. Each tool
//! call validates its arguments, delegates to the injected [`ObjectStore`],
//! and returns the normalized result as JSON text content. Provider failures
//! surface as tool errors carrying the taxonomy label; nothing is retried or
//! swallowed here.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::schema_for_type,
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    schemars::{self, JsonSchema},
    service::{RequestContext, RoleServer},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{stdin, stdout};

use st_core::{Error, ObjectStore, validate};

/// Stratus MCP Server
///
/// Holds an injected storage handle; no process-wide mutable state.
#[derive(Clone)]
pub struct StratusMcpServer {
    store: Arc<dyn ObjectStore>,
}

impl StratusMcpServer {
    /// Create a new MCP server around the given store
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Run the MCP server using stdio transport
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!("Starting stratus MCP server...");
        let server = self.serve(stdio()).await?;
        tracing::info!("MCP server initialized, waiting for requests...");
        server.waiting().await?;
        Ok(())
    }
}

/// Create stdio transport for MCP communication
fn stdio() -> (tokio::io::Stdin, tokio::io::Stdout) {
    (stdin(), stdout())
}

/// Render an operation failure as tool error text
fn tool_error(err: Error) -> String {
    format!("[{}] {err}", err.kind())
}

// ============================================================================
// Tool Parameter Types
// ============================================================================

/// Parameters for tools that take no arguments
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EmptyParams {}

/// Parameters for the get_bucket_objects tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetBucketObjectsParams {
    /// Name of the bucket to list
    pub bucket_name: String,
    /// Prefix to filter objects
    #[serde(default)]
    pub prefix: String,
    /// Delimiter for hierarchy grouping
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// Parameters for the read_object tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReadObjectParams {
    /// Name of the bucket
    pub bucket_name: String,
    /// Path to the object within the bucket
    pub object_path: String,
}

/// Parameters for the create_bucket tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateBucketParams {
    /// Name of the new bucket (unique provider-wide)
    pub bucket_name: String,
    /// Location for the bucket
    #[serde(default = "default_location")]
    pub location: String,
    /// Storage class for the bucket
    #[serde(default = "default_storage_class")]
    pub storage_class: String,
}

/// Parameters for the delete_bucket tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteBucketParams {
    /// Name of the bucket to delete
    pub bucket_name: String,
    /// Delete every object in the bucket first
    #[serde(default)]
    pub force: bool,
}

/// Parameters for the upload_object tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadObjectParams {
    /// Name of the bucket
    pub bucket_name: String,
    /// Path where to create the object
    pub object_path: String,
    /// Text content to upload
    pub content: String,
    /// Content type of the object
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

/// Parameters for the delete_object tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteObjectParams {
    /// Name of the bucket
    pub bucket_name: String,
    /// Path to the object to delete
    pub object_path: String,
}

/// Parameters for the copy_object tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CopyObjectParams {
    /// Name of the source bucket
    pub source_bucket: String,
    /// Path to the source object
    pub source_object: String,
    /// Name of the destination bucket
    pub destination_bucket: String,
    /// Path for the destination object
    pub destination_object: String,
}

/// Parameters for the list_object_versions tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListObjectVersionsParams {
    /// Name of the bucket
    pub bucket_name: String,
    /// Path to the object
    pub object_path: String,
}

fn default_delimiter() -> String {
    "/".to_string()
}

fn default_location() -> String {
    "US".to_string()
}

fn default_storage_class() -> String {
    "STANDARD".to_string()
}

fn default_content_type() -> String {
    "text/plain".to_string()
}

// ============================================================================
// Tool Implementations
// ============================================================================

impl StratusMcpServer {
    pub async fn handle_list_buckets(&self) -> Result<String, String> {
        tracing::info!("listing buckets");
        let buckets = self.store.list_buckets().await.map_err(tool_error)?;
        serde_json::to_string_pretty(&buckets).map_err(|e| e.to_string())
    }

    pub async fn handle_get_bucket_objects(
        &self,
        params: GetBucketObjectsParams,
    ) -> Result<String, String> {
        validate::bucket_name(&params.bucket_name).map_err(tool_error)?;

        tracing::info!(
            bucket = %params.bucket_name,
            prefix = %params.prefix,
            "listing objects"
        );
        let objects = self
            .store
            .list_objects(&params.bucket_name, &params.prefix, &params.delimiter)
            .await
            .map_err(tool_error)?;
        serde_json::to_string_pretty(&objects).map_err(|e| e.to_string())
    }

    pub async fn handle_read_object(&self, params: ReadObjectParams) -> Result<String, String> {
        validate::bucket_name(&params.bucket_name).map_err(tool_error)?;
        validate::object_path(&params.object_path).map_err(tool_error)?;

        tracing::info!(
            bucket = %params.bucket_name,
            object = %params.object_path,
            "reading object"
        );
        self.store
            .read_object(&params.bucket_name, &params.object_path)
            .await
            .map_err(tool_error)
    }

    pub async fn handle_create_bucket(&self, params: CreateBucketParams) -> Result<String, String> {
        validate::bucket_name(&params.bucket_name).map_err(tool_error)?;

        tracing::info!(
            bucket = %params.bucket_name,
            location = %params.location,
            "creating bucket"
        );
        let bucket = self
            .store
            .create_bucket(&params.bucket_name, &params.location, &params.storage_class)
            .await
            .map_err(tool_error)?;
        serde_json::to_string_pretty(&bucket).map_err(|e| e.to_string())
    }

    pub async fn handle_delete_bucket(&self, params: DeleteBucketParams) -> Result<String, String> {
        validate::bucket_name(&params.bucket_name).map_err(tool_error)?;

        tracing::info!(
            bucket = %params.bucket_name,
            force = params.force,
            "deleting bucket"
        );
        self.store
            .delete_bucket(&params.bucket_name, params.force)
            .await
            .map_err(tool_error)?;

        // Success is always `true`; failure is always an error, never `false`.
        Ok("true".to_string())
    }

    pub async fn handle_upload_object(&self, params: UploadObjectParams) -> Result<String, String> {
        validate::bucket_name(&params.bucket_name).map_err(tool_error)?;
        validate::object_path(&params.object_path).map_err(tool_error)?;

        tracing::info!(
            bucket = %params.bucket_name,
            object = %params.object_path,
            "uploading object"
        );
        let object = self
            .store
            .upload_object(
                &params.bucket_name,
                &params.object_path,
                &params.content,
                &params.content_type,
            )
            .await
            .map_err(tool_error)?;
        serde_json::to_string_pretty(&object).map_err(|e| e.to_string())
    }

    pub async fn handle_delete_object(&self, params: DeleteObjectParams) -> Result<String, String> {
        validate::bucket_name(&params.bucket_name).map_err(tool_error)?;
        validate::object_path(&params.object_path).map_err(tool_error)?;

        tracing::info!(
            bucket = %params.bucket_name,
            object = %params.object_path,
            "deleting object"
        );
        self.store
            .delete_object(&params.bucket_name, &params.object_path)
            .await
            .map_err(tool_error)?;

        Ok("true".to_string())
    }

    pub async fn handle_copy_object(&self, params: CopyObjectParams) -> Result<String, String> {
        validate::bucket_name(&params.source_bucket).map_err(tool_error)?;
        validate::object_path(&params.source_object).map_err(tool_error)?;
        validate::bucket_name(&params.destination_bucket).map_err(tool_error)?;
        validate::object_path(&params.destination_object).map_err(tool_error)?;

        tracing::info!(
            source = %format!("{}/{}", params.source_bucket, params.source_object),
            destination = %format!("{}/{}", params.destination_bucket, params.destination_object),
            "copying object"
        );
        let object = self
            .store
            .copy_object(
                &params.source_bucket,
                &params.source_object,
                &params.destination_bucket,
                &params.destination_object,
            )
            .await
            .map_err(tool_error)?;
        serde_json::to_string_pretty(&object).map_err(|e| e.to_string())
    }

    pub async fn handle_list_object_versions(
        &self,
        params: ListObjectVersionsParams,
    ) -> Result<String, String> {
        validate::bucket_name(&params.bucket_name).map_err(tool_error)?;
        validate::object_path(&params.object_path).map_err(tool_error)?;

        tracing::info!(
            bucket = %params.bucket_name,
            object = %params.object_path,
            "listing object versions"
        );
        let versions = self
            .store
            .list_object_versions(&params.bucket_name, &params.object_path)
            .await
            .map_err(tool_error)?;
        serde_json::to_string_pretty(&versions).map_err(|e| e.to_string())
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

impl ServerHandler for StratusMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "stratus".to_string(),
                title: Some("Stratus GCS MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Stratus MCP Server - Google Cloud Storage operations. \
                Use list_buckets/create_bucket/delete_bucket for buckets, \
                get_bucket_objects/read_object/upload_object/delete_object/copy_object \
                for objects, and list_object_versions for the generations of a \
                versioned object."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "list_buckets",
                "List all GCS buckets in the project with their name, creation time, location and storage class.",
                schema_for_type::<EmptyParams>(),
            ),
            Tool::new(
                "get_bucket_objects",
                "List objects in a GCS bucket with an optional prefix filter; the delimiter groups results into direct children only.",
                schema_for_type::<GetBucketObjectsParams>(),
            ),
            Tool::new(
                "read_object",
                "Read the contents of a GCS object decoded as UTF-8 text.",
                schema_for_type::<ReadObjectParams>(),
            ),
            Tool::new(
                "create_bucket",
                "Create a new GCS bucket with the given location and storage class. Fails if the name is already taken.",
                schema_for_type::<CreateBucketParams>(),
            ),
            Tool::new(
                "delete_bucket",
                "Delete a GCS bucket. With force, every object in the bucket is deleted first; without it, a non-empty bucket fails.",
                schema_for_type::<DeleteBucketParams>(),
            ),
            Tool::new(
                "upload_object",
                "Upload text content to a GCS object, overwriting any existing object at that path.",
                schema_for_type::<UploadObjectParams>(),
            ),
            Tool::new(
                "delete_object",
                "Delete an object from a GCS bucket. Fails if the object does not exist.",
                schema_for_type::<DeleteObjectParams>(),
            ),
            Tool::new(
                "copy_object",
                "Copy an object from one location to another in GCS, leaving the source untouched.",
                schema_for_type::<CopyObjectParams>(),
            ),
            Tool::new(
                "list_object_versions",
                "List all generations of an object if versioning is enabled on the bucket.",
                schema_for_type::<ListObjectVersionsParams>(),
            ),
        ];

        Ok(ListToolsResult {
            meta: None,
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = Value::Object(request.arguments.unwrap_or_default());

        let result = match request.name.as_ref() {
            "list_buckets" => self.handle_list_buckets().await,
            "get_bucket_objects" => {
                let params: GetBucketObjectsParams = parse_params(arguments)?;
                self.handle_get_bucket_objects(params).await
            }
            "read_object" => {
                let params: ReadObjectParams = parse_params(arguments)?;
                self.handle_read_object(params).await
            }
            "create_bucket" => {
                let params: CreateBucketParams = parse_params(arguments)?;
                self.handle_create_bucket(params).await
            }
            "delete_bucket" => {
                let params: DeleteBucketParams = parse_params(arguments)?;
                self.handle_delete_bucket(params).await
            }
            "upload_object" => {
                let params: UploadObjectParams = parse_params(arguments)?;
                self.handle_upload_object(params).await
            }
            "delete_object" => {
                let params: DeleteObjectParams = parse_params(arguments)?;
                self.handle_delete_object(params).await
            }
            "copy_object" => {
                let params: CopyObjectParams = parse_params(arguments)?;
                self.handle_copy_object(params).await
            }
            "list_object_versions" => {
                let params: ListObjectVersionsParams = parse_params(arguments)?;
                self.handle_list_object_versions(params).await
            }
            other => Err(format!("Unknown tool: {other}")),
        };

        match result {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(error) => Ok(CallToolResult::error(vec![Content::text(error)])),
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(arguments: Value) -> Result<T, McpError> {
    serde_json::from_value(arguments)
        .map_err(|e| McpError::invalid_params(format!("Invalid parameters: {}", e), None))
}
