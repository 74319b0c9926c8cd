//! Business logic services

pub mod background;
pub mod entity;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    models::{Book, Member},
    repository::{search::SearchClient, Repository},
};

pub use background::BackgroundTasks;
pub use entity::{BookService, EntityService, MemberService};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: BookService,
    pub members: MemberService,
    /// Detached index writes started by `books` and `members`
    pub tasks: BackgroundTasks,
}

impl Services {
    /// Create all services with the given repository and search client
    pub fn new(repository: Repository, search: SearchClient, config: &AppConfig) -> Self {
        let tasks = BackgroundTasks::new();
        let call_timeout = config.service.timeout();
        let index_timeout = config.search.index_timeout();

        let books = EntityService::new(
            Arc::new(repository.books),
            Arc::new(search.index::<Book>(index_timeout)),
            tasks.clone(),
        )
        .with_timeouts(call_timeout, index_timeout);

        let members = EntityService::new(
            Arc::new(repository.members),
            Arc::new(search.index::<Member>(index_timeout)),
            tasks.clone(),
        )
        .with_timeouts(call_timeout, index_timeout);

        Self {
            books,
            members,
            tasks,
        }
    }
}
