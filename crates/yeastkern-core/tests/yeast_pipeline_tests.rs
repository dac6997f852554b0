//! Integration tests for the yeast dataset pipeline against a populated
//! binary cache.
//!
//! The cache is seeded directly, so every assertion here also proves the
//! fetch layer is bypassed: any network access would fail (and none is
//! attempted when the expected files exist).

use ndarray::Array2;
use tempfile::TempDir;
use yeastkern_library::config::YeastConfig;
use yeastkern_library::dataset::store;
use yeastkern_library::YeastFetcher;

const N_SAMPLES: usize = 8;

/// Seed a synthetic cache: six kernel matrices and a label matrix with
/// known exclusive memberships for classes 5 and 7 (columns 4 and 6).
fn seed_cache(data_dir: &std::path::Path) {
    for (kernel_index, name) in YeastConfig::KERNEL_NAMES.iter().enumerate() {
        let matrix = Array2::from_shape_fn((N_SAMPLES, N_SAMPLES), |(row, col)| {
            (row * N_SAMPLES + col) as f64 + kernel_index as f64 * 1000.0
        });
        store::save_matrix(&data_dir.join(store::cache_file_name(name)), &matrix).unwrap();
    }

    let mut labels = Array2::from_elem((N_SAMPLES, YeastConfig::N_CLASSES), -1.0);
    labels[[0, 4]] = 1.0; // exclusive to class 5
    labels[[2, 4]] = 1.0; // exclusive to class 5
    labels[[1, 6]] = 1.0; // exclusive to class 7
    labels[[5, 6]] = 1.0; // exclusive to class 7
    labels[[3, 4]] = 1.0; // member of both target classes
    labels[[3, 6]] = 1.0;
    labels[[4, 0]] = 1.0; // member of an unrelated class only
    labels[[6, 4]] = 1.0; // class 5 membership spoiled by another class
    labels[[6, 9]] = 1.0;
    store::save_matrix(
        &data_dir.join(store::cache_file_name(YeastConfig::LABELS_STEM)),
        &labels,
    )
    .unwrap();
}

#[tokio::test]
async fn test_fetch_data_from_populated_cache() {
    let temp_dir = TempDir::new().unwrap();
    seed_cache(temp_dir.path());

    let fetcher = YeastFetcher::new(temp_dir.path()).unwrap();
    let data = fetcher.fetch_data().await.unwrap();

    assert_eq!(data.kernels.len(), YeastConfig::KERNEL_NAMES.len());
    assert_eq!(data.y.dim(), (N_SAMPLES, YeastConfig::N_CLASSES));
    // K concatenates every kernel along columns, rows aligned.
    assert_eq!(
        data.k.dim(),
        (N_SAMPLES, N_SAMPLES * YeastConfig::KERNEL_NAMES.len())
    );
    // Second kernel block starts at column N_SAMPLES.
    assert_eq!(data.k[[0, N_SAMPLES]], 1000.0);

    let first = data.kernel(YeastConfig::KERNEL_NAMES[0]).unwrap();
    assert_eq!(first[[1, 2]], (N_SAMPLES + 2) as f64);
}

#[tokio::test]
async fn test_fetch_data_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    seed_cache(temp_dir.path());

    let fetcher = YeastFetcher::new(temp_dir.path()).unwrap();
    let first = fetcher.fetch_data().await.unwrap();
    let second = fetcher.fetch_data().await.unwrap();

    assert_eq!(first.k, second.k);
    assert_eq!(first.y, second.y);
}

#[tokio::test]
async fn test_class_pair_selection_and_labels() {
    let temp_dir = TempDir::new().unwrap();
    seed_cache(temp_dir.path());

    let fetcher = YeastFetcher::new(temp_dir.path()).unwrap();
    let pair = fetcher.fetch_5_7().await.unwrap();

    // Exclusive rows: class 5 -> {0, 2}, class 7 -> {1, 5}; the dual
    // member (3), other-class member (4) and spoiled row (6) are excluded.
    assert_eq!(pair.y.len(), 4);
    assert_eq!(pair.y.to_vec(), vec![1.0, 1.0, -1.0, -1.0]);

    // Kernels are reduced to the selected samples on both axes.
    for (_, kernel) in &pair.kernels {
        assert_eq!(kernel.dim(), (4, 4));
    }
    assert_eq!(pair.k.dim(), (4, 4 * YeastConfig::KERNEL_NAMES.len()));

    // Selection order is class-5 block then class-7 block, each ascending:
    // rows [0, 2, 1, 5] of the original kernels.
    let first = &pair.kernels[0].1;
    assert_eq!(first[[0, 1]], 2.0); // original [0, 2]
    assert_eq!(first[[1, 0]], 16.0); // original [2, 0]
    assert_eq!(first[[3, 3]], (5 * N_SAMPLES + 5) as f64); // original [5, 5]
}

#[tokio::test]
async fn test_class_pair_is_memoized_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    seed_cache(temp_dir.path());

    let fetcher = YeastFetcher::new(temp_dir.path()).unwrap();
    let first = fetcher.fetch_5_7().await.unwrap();

    // Zero-based columns in the memo file name.
    let memo = temp_dir.path().join("yeast_data__4_6.bin");
    assert!(memo.exists());

    // Presence of the memo short-circuits recomputation entirely: even with
    // the source cache gone, the subset is served from the memo file.
    for name in YeastConfig::KERNEL_NAMES {
        std::fs::remove_file(temp_dir.path().join(store::cache_file_name(name))).unwrap();
    }
    let second = fetcher.fetch_5_7().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unreadable_memo_is_recomputed() {
    let temp_dir = TempDir::new().unwrap();
    seed_cache(temp_dir.path());

    let memo = temp_dir.path().join("yeast_data__4_6.bin");
    std::fs::write(&memo, b"not a subset").unwrap();

    let fetcher = YeastFetcher::new(temp_dir.path()).unwrap();
    let pair = fetcher.fetch_class_pair(5, 7).await.unwrap();

    assert_eq!(pair.y.len(), 4);
    // The memo was rewritten with a readable subset.
    let reloaded: yeastkern_library::ClassPairSubset = store::load(&memo).unwrap();
    assert_eq!(reloaded, pair);
}

#[tokio::test]
async fn test_class_pair_cache_key_is_order_sensitive() {
    let temp_dir = TempDir::new().unwrap();
    seed_cache(temp_dir.path());

    let fetcher = YeastFetcher::new(temp_dir.path()).unwrap();
    let five_seven = fetcher.fetch_class_pair(5, 7).await.unwrap();
    let seven_five = fetcher.fetch_class_pair(7, 5).await.unwrap();

    assert!(temp_dir.path().join("yeast_data__4_6.bin").exists());
    assert!(temp_dir.path().join("yeast_data__6_4.bin").exists());

    // Same samples, opposite block order and label polarity.
    assert_eq!(five_seven.y.to_vec(), vec![1.0, 1.0, -1.0, -1.0]);
    assert_eq!(seven_five.y.to_vec(), vec![1.0, 1.0, -1.0, -1.0]);
    assert_ne!(five_seven.kernels[0].1, seven_five.kernels[0].1);
}
