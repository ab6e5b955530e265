use std::marker::PhantomData;

use crate::model::Record;
use crate::mvi::{Intent, Reducer};

use super::state::StoreState;
use super::view::derive_view;

#[derive(Debug, Clone)]
pub enum StoreIntent<R: Record> {
    /// A full load (initial or retry) began.
    LoadStarted,
    /// A page extension began.
    PageStarted,
    /// The collection resolved; `records` is its first page.
    FirstPage { records: Vec<R>, total: usize },
    /// Records `[end - page_size, end)` of the collection, clipped to `total`.
    PageAppended {
        records: Vec<R>,
        end: usize,
        total: usize,
    },
    /// The collection has nothing past what is materialized.
    Exhausted { total: usize },
    LoadFailed { message: String },
    /// Operation ended without changing data.
    Settled,
    QueryChanged(String),
    ErrorCleared,
    DisplayModeToggled,
    Selected(Option<R::Id>),
}

impl<R: Record> Intent for StoreIntent<R> {}

pub struct StoreReducer<R>(PhantomData<R>);

impl<R: Record> Reducer for StoreReducer<R> {
    type State = StoreState<R>;
    type Intent = StoreIntent<R>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            StoreIntent::LoadStarted => {
                state.loading = true;
                state.last_error = None;
            }
            StoreIntent::PageStarted => {
                state.loading = true;
            }
            StoreIntent::FirstPage { records, total } => {
                state.has_more = total > records.len();
                state.all = records;
                state.total = total;
                state.page_cursor = 1;
                state.loading = false;
                state.view = derive_view(&state.all, &state.query);
                retain_selection(&mut state);
            }
            StoreIntent::PageAppended {
                records,
                end,
                total,
            } => {
                state.all.extend(records);
                state.total = total;
                state.page_cursor += 1;
                state.has_more = end < total;
                state.loading = false;
                state.view = derive_view(&state.all, &state.query);
            }
            StoreIntent::Exhausted { total } => {
                state.total = total;
                state.has_more = false;
                state.loading = false;
            }
            StoreIntent::LoadFailed { message } => {
                state.last_error = Some(message);
                state.loading = false;
            }
            StoreIntent::Settled => {
                state.loading = false;
            }
            StoreIntent::QueryChanged(query) => {
                state.view = derive_view(&state.all, &query);
                state.query = query;
            }
            StoreIntent::ErrorCleared => {
                state.last_error = None;
            }
            StoreIntent::DisplayModeToggled => {
                state.dark_mode = !state.dark_mode;
            }
            StoreIntent::Selected(id) => {
                state.selected = id;
                retain_selection(&mut state);
            }
        }
        state
    }
}

/// Drop a selection that no longer points into `all`.
fn retain_selection<R: Record>(state: &mut StoreState<R>) {
    if let Some(id) = &state.selected {
        if !state.all.iter().any(|r| &r.id() == id) {
            state.selected = None;
        }
    }
}
