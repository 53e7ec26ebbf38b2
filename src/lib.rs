//! # Zeta4G Routing
//!
//! Cluster routing table cache for the [Zeta4G](https://github.com/zeta9044/zeta4g)
//! driver.
//!
//! Cluster membership changes over time (elections, scaling, failover), so the
//! driver never hard-codes it. Instead a [`Router`] asks a router-capable server
//! for the current routing table and caches it for the table's time-to-live.
//!
//! ## Features
//!
//! - **Lazy refresh** - The table is refreshed on access once its TTL has elapsed
//! - **Two-tier discovery** - Root router first, then a caller-supplied backup list
//! - **Thread Safety** - Any number of tasks may read readers/writers concurrently
//! - **Deterministic Testing** - Injectable [`Clock`]
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zeta4g_routing::{ConnectionPool, Router, RouterConfig, ServerAddress};
//!
//! # async fn example(pool: Arc<dyn ConnectionPool>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = RouterConfig::builder("zeta4g://core1:7687")?
//!     .with_routing_context("region", "eu-west")
//!     .build();
//!
//! let router = Router::with_config(
//!     config,
//!     || vec![ServerAddress::new("core2", 7687), ServerAddress::new("core3", 7687)],
//!     pool,
//! );
//!
//! let readers = router.readers().await?;
//! let writers = router.writers().await?;
//! println!("readers: {:?}, writers: {:?}", readers, writers);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! A failed refresh is returned as [`DriverError::Discovery`], annotated with the
//! tier that failed last. The previous table is kept and the next access retries:
//!
//! ```rust,no_run
//! # use zeta4g_routing::{DiscoveryTier, DriverError, Router};
//! # async fn example(router: &Router) {
//! match router.writers().await {
//!     Ok(writers) => println!("{} writers", writers.len()),
//!     Err(DriverError::Discovery { tier: DiscoveryTier::BackupRouters, source }) => {
//!         eprintln!("No router reachable: {}", source)
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`driver`] - Server addresses, errors, the connection pool boundary and routing

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod driver;

// Re-exports for convenience
pub use driver::{
    ServerAddress, DiscoveryTier, DriverError, DriverResult,
    Connection, ConnectionPool, BorrowedConnection,
};

pub use driver::routing::{
    Clock, ManualClock, SystemClock,
    Router, RouterConfig, RouterConfigBuilder, RoutingContext,
    RoutingTable, RoutingTableBuilder, ServerRole,
};
