//! Client-side search and paging for the embedded tables.
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Rows that can be matched against a search box
pub trait Searchable {
    /// `filter` is already lowercased and trimmed
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Case-insensitive containment, the building block for `Searchable` impls
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(&filter))
        .collect()
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Rows of the 0-indexed `page`; an out of range page yields the last page
pub fn page_slice<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page_size == 0 {
        return items.to_vec();
    }
    let last = total_pages(items.len(), page_size) - 1;
    let start = page.min(last) * page_size;
    items.iter().skip(start).take(page_size).cloned().collect()
}

/// Search box that reports its value 300ms after the last keystroke
#[component]
pub fn SearchInput(
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search".to_string()
    } else {
        placeholder
    };
    let text = RwSignal::new(String::new());
    let keystroke = StoredValue::new(0u64);

    let handle_input = move |value: String| {
        text.set(value.clone());
        let seq = keystroke.get_value() + 1;
        keystroke.set_value(seq);
        spawn_local(async move {
            TimeoutFuture::new(300).await;
            if keystroke.try_get_value() == Some(seq) {
                on_change.run(value);
            }
        });
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !text.get().is_empty()>
                <button
                    class="search-input__clear"
                    title="Clear"
                    on:click=move |_| {
                        keystroke.update_value(|k| *k += 1);
                        text.set(String::new());
                        on_change.run(String::new());
                    }
                >
                    "×"
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(&'static str);

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ci(self.0, filter)
        }
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let rows = vec![Row("Shelf A"), Row("Bin 3"), Row("shelf b")];
        let found = filter_list(rows.clone(), "  SHELF ");
        assert_eq!(found.len(), 2);
        assert_eq!(filter_list(rows, "").len(), 3);
    }

    #[test]
    fn test_paging() {
        let items: Vec<i32> = (1..=7).collect();
        assert_eq!(total_pages(items.len(), 3), 3);
        assert_eq!(total_pages(0, 3), 1);
        assert_eq!(page_slice(&items, 1, 3), vec![4, 5, 6]);
        assert_eq!(page_slice(&items, 2, 3), vec![7]);
        assert_eq!(page_slice(&items, 10, 3), vec![7]);
    }
}
