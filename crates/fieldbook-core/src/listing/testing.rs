//! Scripted in-memory page source for list tests

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::filter::FilterSpec;
use super::source::PageSource;
use crate::entities::{Entity, Page, Product};
use crate::error::{DashboardError, Result};

/// A request the fake observed
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Page {
        page: u32,
        per_page: u32,
        filter: FilterSpec,
    },
    Search {
        term: String,
    },
}

struct Scripted<T> {
    delay: Duration,
    result: Result<Page<T>>,
}

/// Answers calls in order from a script; each answer may be delayed
pub struct FakeSource<T> {
    script: Mutex<VecDeque<Scripted<T>>>,
    calls: Mutex<Vec<Call>>,
}

impl<T: Entity> FakeSource<T> {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(&self, page: Page<T>) -> &Self {
        self.respond_after(Duration::ZERO, Ok(page))
    }

    pub fn fail(&self, status: u16, message: &str) -> &Self {
        self.respond_after(Duration::ZERO, Err(DashboardError::fetch(Some(status), message)))
    }

    pub fn respond_after(&self, delay: Duration, result: Result<Page<T>>) -> &Self {
        self.script.lock().push_back(Scripted { delay, result });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    async fn answer(&self, call: Call) -> Result<Page<T>> {
        self.calls.lock().push(call);
        let next = self.script.lock().pop_front();
        match next {
            Some(scripted) => {
                if !scripted.delay.is_zero() {
                    tokio::time::sleep(scripted.delay).await;
                }
                scripted.result
            }
            None => Err(DashboardError::fetch(Some(500), "unscripted request")),
        }
    }
}

#[async_trait]
impl<T: Entity> PageSource<T> for FakeSource<T> {
    async fn fetch_page(&self, page: u32, per_page: u32, filter: &FilterSpec) -> Result<Page<T>> {
        self.answer(Call::Page {
            page,
            per_page,
            filter: filter.clone(),
        })
        .await
    }

    async fn search(&self, term: &str, _filter: &FilterSpec) -> Result<Page<T>> {
        self.answer(Call::Search {
            term: term.to_string(),
        })
        .await
    }
}

pub fn product(id: i64) -> Product {
    Product {
        id,
        name: format!("Product {}", id),
        taxed_price_store: 0.0,
        untaxed_price_store: 0.0,
        taxed_price_client: 0.0,
        untaxed_price_client: 0.0,
        has_thumbnail: false,
        image_count: 0,
        can_edit: false,
    }
}

pub fn product_page(ids: &[i64], page: u32, has_more: bool, total: u64) -> Page<Product> {
    Page {
        items: ids.iter().map(|id| product(*id)).collect(),
        page,
        has_more,
        total,
    }
}
