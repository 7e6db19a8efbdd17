//! list / search / filter

use anyhow::Result;
use fieldbook_core::listing::{ListConfig, SkipReason};
use fieldbook_core::{
    Client, Entity, EntityKind, FilterSpec, LoadOutcome, PagedListController, Preferences,
    Product, Report, StatusFilter,
};
use tracing::info;

use super::AppContext;
use crate::render::{self, Tabular};

pub struct ListArgs {
    pub kind: EntityKind,
    pub status: Option<StatusFilter>,
    pub region: Option<String>,
    pub salesman: Option<String>,
    pub pages: u32,
    pub all: bool,
}

impl ListArgs {
    /// Explicit flags win over the saved filter, part by part
    fn filter(&self, prefs: Option<&Preferences>) -> FilterSpec {
        let saved = prefs
            .map(|p| p.list_filter(self.kind))
            .unwrap_or_default();
        let mut filter = FilterSpec {
            status: self.status.unwrap_or(saved.status),
            ..saved
        };
        if let Some(region) = &self.region {
            filter = filter.region(region.as_str());
        }
        if let Some(salesman) = &self.salesman {
            filter = filter.salesman(salesman.as_str());
        }
        filter
    }

    fn page_budget(&self) -> u32 {
        if self.all {
            u32::MAX
        } else {
            self.pages.max(1)
        }
    }
}

fn controller<T: Entity>(ctx: &AppContext) -> PagedListController<T> {
    let config = ListConfig::for_kind(T::KIND).page_size(ctx.client.config().page_size(T::KIND));
    PagedListController::<T>::with_config(ctx.client.clone(), config)
}

/// Keep pressing "Load More" until `pages` pages are loaded or the list ends
pub(crate) async fn load_more<T: Entity>(list: &PagedListController<T>, pages: u32) -> Result<u32> {
    let mut loaded = 1;
    while loaded < pages {
        match list.load_next_page().await? {
            LoadOutcome::Applied(_) => loaded += 1,
            LoadOutcome::Superseded | LoadOutcome::Skipped(_) => break,
        }
    }
    Ok(loaded)
}

fn footer<T: Entity>(list: &PagedListController<T>) -> String {
    let mut text = format!("Showing {} of {} {}", list.len(), list.total(), T::KIND);
    if list.has_more() {
        text.push_str(" (more available: use --pages N or --all)");
    }
    text
}

pub async fn list(ctx: &AppContext, prefs: Option<&Preferences>, args: ListArgs) -> Result<()> {
    ctx.require_login()?;
    let filter = args.filter(prefs);
    let pages = args.page_budget();
    info!("Listing {} with status {}", args.kind, filter.status);

    match args.kind {
        EntityKind::Products => list_entities::<Product>(ctx, filter, pages).await,
        EntityKind::Clients => list_entities::<Client>(ctx, filter, pages).await,
        EntityKind::Reports => list_entities::<Report>(ctx, filter, pages).await,
    }
}

async fn list_entities<T: Tabular>(ctx: &AppContext, filter: FilterSpec, pages: u32) -> Result<()> {
    let list = controller::<T>(ctx);
    list.load_first_page(filter).await?;
    load_more(&list, pages).await?;

    list.with_items(|items| println!("{}", render::table(items)));
    println!();
    println!("{}", footer(&list));
    Ok(())
}

pub async fn search(ctx: &AppContext, kind: EntityKind, term: &str) -> Result<()> {
    ctx.require_login()?;
    match kind {
        EntityKind::Products => search_entities::<Product>(ctx, term).await,
        EntityKind::Clients => search_entities::<Client>(ctx, term).await,
        EntityKind::Reports => search_entities::<Report>(ctx, term).await,
    }
}

async fn search_entities<T: Tabular>(ctx: &AppContext, term: &str) -> Result<()> {
    let list = controller::<T>(ctx);
    match list.search_now(term).await? {
        LoadOutcome::Skipped(SkipReason::TermTooShort) => {
            println!("Search term must be at least 2 characters");
        }
        _ if list.is_empty() => println!("No {} match '{}'", T::KIND, term.trim()),
        _ => {
            list.with_items(|items| println!("{}", render::table(items)));
            println!();
            println!("{} results for '{}'", list.len(), term.trim());
        }
    }
    Ok(())
}

/// Changes to the saved filter of a list
#[derive(Debug, Default)]
pub struct FilterArgs {
    pub status: Option<StatusFilter>,
    /// An empty value clears the saved region
    pub region: Option<String>,
    pub salesman: Option<String>,
    pub reset: bool,
}

impl FilterArgs {
    fn is_query(&self) -> bool {
        self.status.is_none() && self.region.is_none() && self.salesman.is_none() && !self.reset
    }
}

fn describe_filter(filter: &FilterSpec) -> String {
    format!(
        "status {}, region {}, salesman {}",
        filter.status,
        filter.region.as_deref().unwrap_or("any"),
        filter.salesman.as_deref().unwrap_or("any")
    )
}

/// Show or change the saved filter of a list
pub fn filter(prefs: &Preferences, kind: EntityKind, args: FilterArgs) -> Result<()> {
    if args.is_query() {
        println!("{} filter: {}", kind, describe_filter(&prefs.list_filter(kind)));
        return Ok(());
    }

    let mut filter = if args.reset {
        prefs.reset_list_filter(kind)?;
        FilterSpec::default()
    } else {
        prefs.list_filter(kind)
    };
    if let Some(status) = args.status {
        filter.status = status;
    }
    if let Some(region) = args.region {
        filter = filter.region(region);
    }
    if let Some(salesman) = args.salesman {
        filter = filter.salesman(salesman);
    }

    if filter != FilterSpec::default() || !args.reset {
        prefs.set_list_filter(kind, &filter)?;
    }
    println!("{} filter set to {}", kind, describe_filter(&filter));
    Ok(())
}
