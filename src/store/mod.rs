/*!
 * Project persistence.
 *
 * A thin SQLite-backed store for whole translation projects, exposed to the
 * rest of the application as save/list/delete operations. Block lists are
 * persisted as opaque JSON; the example sampler consumes them unchanged.
 */

pub mod connection;
pub mod models;
pub mod repository;

pub use connection::StoreConnection;
pub use models::ProjectRecord;
pub use repository::ProjectRepository;
