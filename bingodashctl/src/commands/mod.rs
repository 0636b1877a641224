pub mod auth;
pub mod cards;
pub mod challenges;
pub mod promo;
pub mod revenue;
pub mod users;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use bingodash_config::Config;
use bingodash_core::{
    AdminApi, AdminContext, ApiError, CollectionBackend, CollectionSnapshot,
    CollectionStore, ColumnSpec, ExternallyDrivenSort, HttpApiClient, Screen,
    SelfManagedSort, SnapshotStore, SortController,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::cli::{Command, ListArgs, OutputFormat};
use crate::render::{Table, page_footer};
use crate::session::SessionFile;

/// Everything a command needs: the wired-up context, the state dir and
/// the persisted session.
#[derive(Debug)]
pub struct App {
    pub ctx: AdminContext,
    pub snapshots: SnapshotStore,
    pub session: SessionFile,
}

impl App {
    pub async fn from_config(config: &Config) -> Result<Self> {
        let client =
            HttpApiClient::new(&config.api.base_url, config.api.timeout)
                .context("failed to build API client")?;
        let api: Arc<dyn AdminApi> = Arc::new(client);
        let ctx = AdminContext::new(api, config.store_settings());
        let snapshots = SnapshotStore::new(&config.storage.state_dir);
        let session = SessionFile::new(snapshots.clone());
        session.restore_into(ctx.auth()).await;
        Ok(Self {
            ctx,
            snapshots,
            session,
        })
    }

    pub fn require_session(&self) -> Result<()> {
        if !self.ctx.auth().is_authenticated() {
            bail!("not signed in; run `bingodashctl login` first");
        }
        Ok(())
    }

    /// Drops the stored session after the backend rejected its token.
    pub async fn expire_session(&self) {
        self.ctx.auth().sign_out().await;
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "could not clear expired session");
        }
    }
}

pub async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            auth::login(app, &email, password).await
        }
        Command::Logout => auth::logout(app).await,
        Command::Whoami { verify } => auth::whoami(app, verify).await,
        Command::Refresh => auth::refresh(app).await,
        Command::Users { action } => {
            app.require_session()?;
            users::run(app, action).await
        }
        Command::Promo { action } => {
            app.require_session()?;
            promo::run(app, action).await
        }
        Command::Cards { action } => {
            app.require_session()?;
            cards::run(app, action).await
        }
        Command::Challenges { action } => {
            app.require_session()?;
            challenges::run(app, action).await
        }
        Command::Revenue { action } => {
            app.require_session()?;
            revenue::run(app, action).await
        }
    }
}

/// Whether `err` carries the backend's 401.
pub fn is_auth_expired(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>()
        .is_some_and(ApiError::is_auth_expired)
}

/// Who owns the ordering of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOwner {
    /// The store orders rows (backend sort, or client sort before paging).
    Store,
    /// The table sorts whatever page the store returned.
    Table,
}

fn click_through<C: SortController>(
    controller: &mut C,
    column: &str,
    clicks: usize,
    mut after: impl FnMut(&mut C),
) -> Result<()> {
    for _ in 0..clicks {
        if !controller.click(column) {
            let sortable: Vec<&str> = controller
                .columns()
                .iter()
                .filter(|c| c.sortable)
                .map(|c| c.key.as_str())
                .collect();
            bail!(
                "cannot sort by '{column}'; sortable columns: {}",
                sortable.join(", ")
            );
        }
        after(controller);
    }
    Ok(())
}

/// Applies the list flags to a screen's store, loads it and prints the
/// current page. The resulting view is saved so `--last` can resume it.
pub async fn list_screen<B>(
    app: &App,
    screen: &Screen<CollectionStore<B>>,
    args: &ListArgs,
    filter: Option<B::Filter>,
    columns: Vec<ColumnSpec>,
    owner: SortOwner,
) -> Result<()>
where
    B: CollectionBackend,
    B::Item: Serialize + DeserializeOwned,
    B::Filter: Serialize + DeserializeOwned,
{
    let store = &screen.store;
    if args.last
        && let Some(snapshot) = app
            .snapshots
            .load::<CollectionSnapshot<B::Item, B::Filter>>(B::NAME)?
    {
        store.restore(snapshot);
    }
    let dataset_changed = filter
        .as_ref()
        .is_some_and(|next| *next != store.filter());
    if let Some(filter) = filter {
        store.set_filter(filter);
    }
    if let Some(size) = args.page_size {
        store.set_page_size(size);
    }
    if let Some(term) = &args.search {
        store.set_search_term(term.as_str());
    }

    let mut table_sort =
        SelfManagedSort::new(columns.clone()).with_state(store.sort());
    if dataset_changed && owner == SortOwner::Table {
        table_sort.reset();
        store.set_sort(table_sort.state());
    }
    if let Some(column) = &args.sort {
        match owner {
            SortOwner::Store => {
                let target = store.clone();
                let mut controller = ExternallyDrivenSort::new(
                    columns.clone(),
                    store.sort(),
                    move |next| target.set_sort(next),
                );
                click_through(&mut controller, column, args.sort_clicks, |c| {
                    c.sync(store.sort())
                })?;
            }
            SortOwner::Table => {
                click_through(
                    &mut table_sort,
                    column,
                    args.sort_clicks,
                    |_| {},
                )?;
                store.set_sort(table_sort.state());
            }
        }
    }
    store.set_page(args.page);

    screen.mount().await?;

    let visible = store.visible();
    let sort = store.sort();
    let rows = match owner {
        SortOwner::Store => visible,
        SortOwner::Table => table_sort.rows(&visible).into_owned(),
    };

    if let Err(err) = app.snapshots.save(B::NAME, &store.snapshot()) {
        warn!(error = %err, store = B::NAME, "could not save list view");
    }

    match args.format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            let table = Table::from_items(&columns, &sort, &rows);
            let mut out = std::io::stdout().lock();
            if table.is_empty() {
                writeln!(out, "no {} found", B::NAME.replace('_', " "))?;
            } else {
                write!(out, "{table}")?;
            }
            writeln!(out, "{}", page_footer(&store.page()))?;
            Ok(())
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
