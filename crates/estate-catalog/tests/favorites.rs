use std::thread;

use estate_catalog::catalog::{CatalogStore, PropertyId};
use estate_catalog::favorites::FavoritesStore;

#[test]
fn handles_share_one_set_across_threads() {
    let store = CatalogStore::standard().expect("bundled catalog loads");
    let favorites = FavoritesStore::new();

    let workers: Vec<_> = store
        .properties()
        .iter()
        .cloned()
        .map(|property| {
            let handle = favorites.clone();
            thread::spawn(move || handle.toggle(property))
        })
        .collect();
    for worker in workers {
        assert!(worker.join().expect("worker panicked"));
    }
    assert_eq!(favorites.len(), store.len());

    let evens: Vec<_> = (2..=10)
        .step_by(2)
        .map(|n| PropertyId::from(n.to_string().as_str()))
        .collect();
    for id in &evens {
        assert!(favorites.remove(id));
    }

    let remaining: Vec<String> = favorites.ids().iter().map(ToString::to_string).collect();
    let mut sorted = remaining.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["1", "3", "5", "7", "9"]);
    assert!(evens.iter().all(|id| !favorites.is_favorite(id)));
}

#[test]
fn repeated_add_keeps_single_entry() {
    let store = CatalogStore::standard().expect("bundled catalog loads");
    let first = store
        .get(&PropertyId::from("1"))
        .cloned()
        .expect("listing present");
    let favorites = FavoritesStore::new();

    favorites.add(first.clone());
    favorites.add(first);

    assert_eq!(favorites.len(), 1);
    assert!(favorites.is_favorite(&PropertyId::from("1")));
    assert!(favorites.remove(&PropertyId::from("1")));
    assert!(!favorites.remove(&PropertyId::from("1")));
    assert!(favorites.is_empty());
}
