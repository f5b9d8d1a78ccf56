//! Typed options model read by the built-in templates.
//!
//! Templates reach into this structure by field path (`stack.limits.global`,
//! `object_storage.s3.endpoint`, ...). Every field serializes, including empty
//! optionals, so a path the built-in templates reference is always defined.
//!
//! Options can be constructed in code or loaded from YAML:
//!
//! ```rust
//! use lokistack_config::Options;
//!
//! let opts = Options::from_yaml(r#"
//! name: lokistack-dev
//! namespace: openshift-logging
//! stack:
//!   replication_factor: 2
//! "#).unwrap();
//!
//! assert_eq!(opts.stack.replication_factor, 2);
//! assert_eq!(opts.storage_directory, "/tmp/loki");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const GRPC_PORT: u16 = 9095;
const HTTP_PORT: u16 = 3100;
const GOSSIP_PORT: u16 = 7946;

/// Everything the built-in templates need to render a LokiStack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub name: String,
    pub namespace: String,
    pub stack: StackSpec,

    pub compactor: Address,
    pub frontend_worker: Address,
    pub gossip_ring: GossipRing,
    pub querier: Address,
    pub index_gateway: Address,

    pub storage_directory: String,
    pub max_concurrent: MaxConcurrent,
    pub write_ahead_log: WriteAheadLog,
    pub object_storage: ObjectStorage,
    pub retention: Retention,
    pub http_timeouts: HttpTimeouts,
    pub enable_remote_reporting: bool,
}

impl Options {
    /// Creates options for the stack `name` in `namespace`.
    ///
    /// Component addresses are derived from the in-cluster service names.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let name = name.into();
        let namespace = namespace.into();
        let service = |component: &str, port: u16| Address {
            fqdn: format!("{name}-{component}.{namespace}.svc.cluster.local"),
            port,
        };

        Self {
            compactor: service("compactor-grpc", GRPC_PORT),
            frontend_worker: service("query-frontend-grpc", GRPC_PORT),
            querier: service("querier-http", HTTP_PORT),
            index_gateway: service("index-gateway-grpc", GRPC_PORT),
            gossip_ring: GossipRing {
                instance_addr: String::new(),
                instance_port: GRPC_PORT,
                bind_port: GOSSIP_PORT,
                members_discovery_addr: format!(
                    "{name}-gossip-ring.{namespace}.svc.cluster.local"
                ),
            },
            stack: StackSpec::default(),
            storage_directory: "/tmp/loki".to_string(),
            max_concurrent: MaxConcurrent::default(),
            write_ahead_log: WriteAheadLog::default(),
            object_storage: ObjectStorage::default(),
            retention: Retention::default(),
            http_timeouts: HttpTimeouts::default(),
            enable_remote_reporting: false,
            name,
            namespace,
        }
    }

    /// Parses options from YAML. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new("lokistack", "default")
    }
}

/// Host and port of a cluster-internal service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub fqdn: String,
    pub port: u16,
}

/// Memberlist settings for the hash ring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GossipRing {
    /// Advertised address. Empty means Loki picks one.
    pub instance_addr: String,
    pub instance_port: u16,
    pub bind_port: u16,
    pub members_discovery_addr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackSpec {
    pub replication_factor: u32,
    pub limits: LimitsSpec,
}

impl Default for StackSpec {
    fn default() -> Self {
        Self {
            replication_factor: 1,
            limits: LimitsSpec::default(),
        }
    }
}

/// Global limits plus per-tenant overrides.
///
/// Tenants are kept in a `BTreeMap` so the runtime configuration lists them in
/// a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsSpec {
    pub global: GlobalLimits,
    pub tenants: BTreeMap<String, TenantLimits>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalLimits {
    pub ingestion: IngestionLimits,
    pub queries: QueryLimits,
}

/// Per-tenant overrides. A missing section inherits the global limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantLimits {
    pub ingestion: Option<IngestionLimits>,
    pub queries: Option<QueryLimits>,
}

/// Write path limits. Rates and bursts are in megabytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionLimits {
    pub ingestion_rate: u32,
    pub ingestion_burst_size: u32,
    pub max_label_name_length: u32,
    pub max_label_value_length: u32,
    pub max_label_names_per_series: u32,
    pub max_global_streams_per_tenant: u32,
    pub max_line_size: u32,
    pub per_stream_rate_limit: u32,
    pub per_stream_rate_limit_burst: u32,
}

impl Default for IngestionLimits {
    fn default() -> Self {
        Self {
            ingestion_rate: 4,
            ingestion_burst_size: 6,
            max_label_name_length: 1024,
            max_label_value_length: 2048,
            max_label_names_per_series: 30,
            max_global_streams_per_tenant: 5000,
            max_line_size: 256000,
            per_stream_rate_limit: 3,
            per_stream_rate_limit_burst: 15,
        }
    }
}

/// Read path limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
    pub max_entries_limit_per_query: u32,
    pub max_chunks_per_query: u32,
    pub max_query_series: u32,
    pub query_timeout: String,
    pub cardinality_limit: u32,
    /// Queries rejected before execution. Only honoured per tenant.
    pub blocked: Vec<BlockedQuery>,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_entries_limit_per_query: 5000,
            max_chunks_per_query: 2_000_000,
            max_query_series: 500,
            query_timeout: "3m".to_string(),
            cardinality_limit: 100_000,
            blocked: Vec::new(),
        }
    }
}

/// A query pattern the query frontend refuses to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockedQuery {
    /// LogQL expression or regex. May span several lines.
    pub pattern: String,
    pub regex: bool,
    pub hash: Option<u32>,
    pub types: Vec<BlockedQueryType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockedQueryType {
    Filter,
    Limited,
    Metric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxConcurrent {
    pub available_query_pod_cores: u32,
}

impl Default for MaxConcurrent {
    fn default() -> Self {
        Self {
            available_query_pod_cores: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteAheadLog {
    pub directory: String,
    /// Bytes of WAL replayed into memory before flushing.
    pub replay_memory_ceiling: u64,
}

impl Default for WriteAheadLog {
    fn default() -> Self {
        Self {
            directory: "/tmp/wal".to_string(),
            replay_memory_ceiling: 2_147_483_648,
        }
    }
}

/// Object storage backend and schema history.
///
/// At most one of `s3`, `gcs` and `azure` is expected to be set; the first set
/// one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectStorage {
    pub shared_store: StorageKind,
    pub s3: Option<S3Storage>,
    pub gcs: Option<GcsStorage>,
    pub azure: Option<AzureStorage>,
    pub schemas: Vec<SchemaConfig>,
}

impl Default for ObjectStorage {
    fn default() -> Self {
        Self {
            shared_store: StorageKind::S3,
            s3: None,
            gcs: None,
            azure: None,
            schemas: vec![SchemaConfig::default()],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    S3,
    Gcs,
    Azure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Storage {
    pub endpoint: String,
    /// Comma separated bucket names.
    pub buckets: String,
    pub region: String,
    pub force_path_style: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcsStorage {
    pub bucket: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureStorage {
    pub environment: String,
    pub container: String,
}

/// One entry of the `schema_config` history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub version: String,
    /// `YYYY-MM-DD` date the schema takes effect.
    pub effective_date: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            version: "v13".to_string(),
            effective_date: "2024-04-01".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Retention {
    pub enabled: bool,
    pub delete_worker_count: u32,
    pub period_days: u32,
}

impl Default for Retention {
    fn default() -> Self {
        Self {
            enabled: false,
            delete_worker_count: 150,
            period_days: 30,
        }
    }
}

/// Server timeouts, as Go duration strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpTimeouts {
    pub idle: String,
    pub read: String,
    pub write: String,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            idle: "30s".to_string(),
            read: "30s".to_string(),
            write: "10m".to_string(),
        }
    }
}
