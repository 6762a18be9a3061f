use crate::book_actor::{self, BookClient};
use crate::config::ServerConfig;
use crate::employee_actor::{self, EmployeeClient};
use crate::framework::FrameworkError;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// The runtime orchestrator owning every collection actor.
///
/// `ResourceSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the collection actors
/// - **Wiring**: Handing out the clients the HTTP layer talks to
///
/// There is no global collection: handlers reach a collection only through a
/// client cloned out of this struct.
///
/// # Example
///
/// ```ignore
/// let system = ResourceSystem::start(&ServerConfig::default());
/// let book = system.books.create(BookCreate::new("1234", "Book Title 1")).await?;
/// system.shutdown().await?;
/// ```
pub struct ResourceSystem {
    /// Client for the `/books` collection
    pub books: BookClient,

    /// Client for the `/employees` collection
    pub employees: EmployeeClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ResourceSystem {
    /// Spawns one actor per collection with the configured identifier rules.
    pub fn start(config: &ServerConfig) -> Self {
        let (book_actor, books) = book_actor::new(config.mailbox_size, config.books.clone());
        let (employee_actor, employees) =
            employee_actor::new(config.mailbox_size, config.employees.clone());

        let handles = vec![
            tokio::spawn(book_actor.run()),
            tokio::spawn(employee_actor.run()),
        ];

        Self {
            books,
            employees,
            handles,
        }
    }

    /// Inserts the demo books under their fixed identifiers and returns how many.
    pub async fn seed_demo_data(&self) -> Result<usize, FrameworkError> {
        let mut count = 0;
        for params in book_actor::demo_books() {
            self.books.create(params).await?;
            count += 1;
        }
        info!(count, "Seeded demo books");
        Ok(count)
    }

    /// Gracefully shuts down every collection.
    ///
    /// Dropping the clients closes the channels; each actor drains what is
    /// already queued and exits its loop. Clients cloned elsewhere (e.g. into
    /// router state) must be dropped first or this waits for them.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down system...");

        drop(self.books);
        drop(self.employees);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
