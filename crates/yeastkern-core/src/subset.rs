//! Selection of samples exclusive to one of two classes.

use ndarray::ArrayView2;

/// Indices of the first samples belonging ONLY to `class_a` or ONLY to
/// `class_b`.
///
/// `labels` holds one row per sample and one column per class, with 1 for
/// membership and -1 otherwise. A sample is exclusive to a class when its
/// flag is 1 in that column and not 1 in every other column, including the
/// other target class.
///
/// The result is the ascending `class_a`-exclusive indices (at most
/// `max_per_class`) followed by the ascending `class_b`-exclusive indices
/// (same bound). Classes with fewer exclusive samples contribute what they
/// have. Columns are zero-based; converting any one-based user-facing
/// numbering is the caller's responsibility, as is bounds-checking the
/// column indices.
pub fn unique_indices(
    labels: ArrayView2<'_, f64>,
    class_a: usize,
    class_b: usize,
    max_per_class: usize,
) -> Vec<usize> {
    let exclusive_to = |class: usize| {
        labels
            .outer_iter()
            .enumerate()
            .filter(move |(_, row)| {
                row[class] == 1.0
                    && row
                        .iter()
                        .enumerate()
                        .all(|(column, &flag)| column == class || flag != 1.0)
            })
            .map(|(index, _)| index)
            .take(max_per_class)
    };

    let mut indices: Vec<usize> = exclusive_to(class_a).collect();
    indices.extend(exclusive_to(class_b));
    indices
}
