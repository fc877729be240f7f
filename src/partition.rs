//! In-place octant partitioning of a contiguous object-index range.

/// Partitions `indices` in place into contiguous blocks keyed by octant mask.
///
/// `octant_of(object_index)` must return a value in `0..num_octants`. Returns
/// the non-empty blocks as `(mask, start, len)` triples in ascending mask order,
/// where `start`/`len` are offsets into `indices` itself. Stability across
/// equal masks is not guaranteed or required.
pub fn partition_by_octant<F>(indices: &mut [u32], num_octants: usize, octant_of: F) -> Vec<(u32, usize, usize)>
where
    F: Fn(u32) -> u32,
{
    let mut counts = vec![0usize; num_octants];
    for &idx in indices.iter() {
        counts[octant_of(idx) as usize] += 1;
    }

    let mut offsets = vec![0usize; num_octants + 1];
    for m in 0..num_octants {
        offsets[m + 1] = offsets[m] + counts[m];
    }

    let mut buf = vec![0u32; indices.len()];
    let mut cursor = offsets.clone();
    for &idx in indices.iter() {
        let m = octant_of(idx) as usize;
        buf[cursor[m]] = idx;
        cursor[m] += 1;
    }
    indices.copy_from_slice(&buf);

    (0..num_octants)
        .filter_map(|m| {
            let len = counts[m];
            (len > 0).then_some((m as u32, offsets[m], len))
        })
        .collect()
}
