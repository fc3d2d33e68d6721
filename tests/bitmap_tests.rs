//! Tests for BitIds
//!
//! These tests verify:
//! - Set/clear/contains round trips and change reporting
//! - Negative IDs are rejected without touching the file
//! - File creation on first update (including clears)
//! - Population count, first-free search and ordered enumeration
//! - Allocation with get_id
//! - Scans across chunk boundaries and partial-word tails

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use bitids::{BitIds, Config};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_bitmap() -> (TempDir, PathBuf, BitIds) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test_bits.bin");
    let bitmap = BitIds::new(&path);
    (temp_dir, path, bitmap)
}

/// Bitmap with an 8-byte chunk so every scan crosses chunk boundaries
fn setup_small_chunk_bitmap() -> (TempDir, PathBuf, BitIds) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("small_chunk.bin");
    let config = Config::builder().chunk_size(8).build().unwrap();
    let bitmap = BitIds::with_config(&path, config);
    (temp_dir, path, bitmap)
}

fn collect_ids(bitmap: &BitIds) -> Vec<i64> {
    let mut ids = Vec::new();
    bitmap.read_ids(|id| ids.push(id)).unwrap();
    ids
}

// =============================================================================
// Empty / Missing File Tests
// =============================================================================

#[test]
fn test_missing_file_reads_as_empty() {
    let (_temp, path, bitmap) = setup_temp_bitmap();

    assert!(!path.exists());
    assert_eq!(bitmap.read_count().unwrap(), 0);
    assert!(collect_ids(&bitmap).is_empty());
    assert_eq!(bitmap.find_first_zero_id().unwrap(), 0);
    assert!(!bitmap.contains(0).unwrap());
    assert!(!bitmap.contains(i64::MAX).unwrap());
    assert!(!path.exists());
}

#[test]
fn test_empty_file_reads_as_empty() {
    let (_temp, path, bitmap) = setup_temp_bitmap();
    fs::write(&path, b"").unwrap();

    assert_eq!(bitmap.read_count().unwrap(), 0);
    assert!(collect_ids(&bitmap).is_empty());
    assert_eq!(bitmap.find_first_zero_id().unwrap(), 0);
}

// =============================================================================
// Update / Contains Tests
// =============================================================================

#[test]
fn test_update_creates_file_and_sets_first_bit() {
    let (_temp, path, bitmap) = setup_temp_bitmap();

    assert!(bitmap.update(0, true).unwrap());

    assert!(path.exists());
    assert_eq!(fs::read(&path).unwrap(), vec![0b1000_0000]);
    assert!(bitmap.contains(0).unwrap());
    assert_eq!(bitmap.read_count().unwrap(), 1);
    assert_eq!(collect_ids(&bitmap), vec![0]);
}

#[test]
fn test_set_then_clear() {
    let (_temp, _path, bitmap) = setup_temp_bitmap();

    for id in [0, 1, 7, 8, 63, 64, 65, 1000] {
        assert!(bitmap.update(id, true).unwrap());
        assert!(bitmap.contains(id).unwrap());
        assert!(bitmap.update(id, false).unwrap());
        assert!(!bitmap.contains(id).unwrap());
    }
}

#[test]
fn test_update_is_idempotent() {
    let (_temp, _path, bitmap) = setup_temp_bitmap();
    bitmap.update(3, true).unwrap();

    assert!(bitmap.update(5, true).unwrap());
    assert!(!bitmap.update(5, true).unwrap());

    assert!(bitmap.update(5, false).unwrap());
    assert!(!bitmap.update(5, false).unwrap());
}

#[test]
fn test_unset_existing_bit() {
    let (_temp, _path, bitmap) = setup_temp_bitmap();
    bitmap.update(5, true).unwrap();
    assert_eq!(bitmap.read_count().unwrap(), 1);

    assert!(bitmap.update(5, false).unwrap());

    assert_eq!(bitmap.read_count().unwrap(), 0);
    assert!(collect_ids(&bitmap).is_empty());
}

#[test]
fn test_clear_on_missing_file_creates_it_and_reports_change() {
    let (_temp, path, bitmap) = setup_temp_bitmap();

    assert!(bitmap.update(12, false).unwrap());

    assert!(path.exists());
    assert_eq!(fs::read(&path).unwrap(), vec![0, 0]);
    assert!(!bitmap.contains(12).unwrap());
}

#[test]
fn test_clear_past_end_of_existing_file_is_no_change() {
    let (_temp, path, bitmap) = setup_temp_bitmap();
    bitmap.update(0, true).unwrap();

    assert!(!bitmap.update(100, false).unwrap());
    assert_eq!(fs::metadata(&path).unwrap().len(), 1);
}

#[test]
fn test_set_past_end_writes_requested_bit() {
    let (_temp, path, bitmap) = setup_temp_bitmap();
    bitmap.update(0, true).unwrap();

    // ID 13 is bit 5 of byte 1, not bit 0
    assert!(bitmap.update(13, true).unwrap());

    assert_eq!(fs::read(&path).unwrap(), vec![0b1000_0000, 0b0000_0100]);
    assert!(bitmap.contains(13).unwrap());
    assert!(!bitmap.contains(8).unwrap());
}

#[test]
fn test_negative_id_rejected() {
    let (_temp, path, bitmap) = setup_temp_bitmap();

    assert!(!bitmap.update(-1, true).unwrap());
    assert!(!bitmap.update(i64::MIN, false).unwrap());
    assert!(!bitmap.contains(-1).unwrap());
    assert!(!path.exists());

    bitmap.update(0, true).unwrap();
    let before = fs::read(&path).unwrap();
    assert!(!bitmap.update(-8, true).unwrap());
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_contains_far_past_end() {
    let (_temp, _path, bitmap) = setup_temp_bitmap();
    bitmap.update(0, true).unwrap();

    assert!(!bitmap.contains(9).unwrap());
    assert!(!bitmap.contains(1 << 40).unwrap());
    assert!(!bitmap.contains(i64::MAX).unwrap());
}

#[test]
fn test_msb_first_layout() {
    let (_temp, path, bitmap) = setup_temp_bitmap();

    bitmap.update(0, true).unwrap();
    bitmap.update(7, true).unwrap();
    bitmap.update(9, true).unwrap();

    assert_eq!(fs::read(&path).unwrap(), vec![0b1000_0001, 0b0100_0000]);
}

// =============================================================================
// Enumeration Tests
// =============================================================================

#[test]
fn test_bits_in_different_bytes() {
    let (_temp, _path, bitmap) = setup_temp_bitmap();

    bitmap.update(0, true).unwrap();
    bitmap.update(8, true).unwrap();
    bitmap.update(15, true).unwrap();
    bitmap.update(1_000_000, true).unwrap();

    assert_eq!(bitmap.read_count().unwrap(), 4);
    assert_eq!(collect_ids(&bitmap), vec![0, 8, 15, 1_000_000]);
}

#[test]
fn test_read_ids_complex_byte() {
    let (_temp, path, bitmap) = setup_temp_bitmap();

    for id in [0, 2, 4, 6, 16, 32] {
        bitmap.update(id, true).unwrap();
    }

    for id in [0, 2, 4, 6, 16, 32] {
        assert!(bitmap.contains(id).unwrap());
    }
    assert_eq!(collect_ids(&bitmap), vec![0, 2, 4, 6, 16, 32]);
    assert_eq!(fs::metadata(&path).unwrap().len(), 5);
}

#[test]
fn test_ids_iterator_matches_read_ids() {
    let (_temp, _path, bitmap) = setup_temp_bitmap();
    for id in [3, 64, 65, 127, 128, 200] {
        bitmap.update(id, true).unwrap();
    }

    let ids: Vec<i64> = bitmap.ids().unwrap().map(|r| r.unwrap()).collect();

    assert_eq!(ids, collect_ids(&bitmap));
    assert_eq!(ids, vec![3, 64, 65, 127, 128, 200]);
}

#[test]
fn test_read_ids_partial_word_tail() {
    let (_temp, path, bitmap) = setup_temp_bitmap();
    // 8 full bytes + 3 tail bytes
    let mut data = vec![0u8; 11];
    data[0] = 0b0000_0001;
    data[8] = 0b1000_0000;
    data[10] = 0b1100_0011;
    fs::write(&path, &data).unwrap();

    assert_eq!(collect_ids(&bitmap), vec![7, 64, 80, 81, 86, 87]);
    assert_eq!(bitmap.read_count().unwrap(), 6);
}

#[test]
fn test_read_ids_all_set() {
    let (_temp, path, bitmap) = setup_temp_bitmap();
    fs::write(&path, [0xFFu8; 19]).unwrap();

    let ids = collect_ids(&bitmap);

    assert_eq!(ids, (0..19 * 8).collect::<Vec<i64>>());
    assert_eq!(bitmap.read_count().unwrap(), 19 * 8);
}

// =============================================================================
// First Zero / Allocation Tests
// =============================================================================

#[test]
fn test_find_first_zero_gap() {
    let (_temp, _path, bitmap) = setup_temp_bitmap();

    bitmap.update(0, true).unwrap();
    bitmap.update(1, true).unwrap();
    bitmap.update(3, true).unwrap();

    assert_eq!(bitmap.find_first_zero_id().unwrap(), 2);
}

#[test]
fn test_find_first_zero_after_end_of_file() {
    let (_temp, path, bitmap) = setup_temp_bitmap();

    bitmap.update(0, true).unwrap();
    assert_eq!(bitmap.find_first_zero_id().unwrap(), 1);

    for id in 0..8 {
        bitmap.update(id, true).unwrap();
    }

    assert_eq!(bitmap.find_first_zero_id().unwrap(), 8);
    assert_eq!(fs::metadata(&path).unwrap().len(), 1);
}

#[test]
fn test_find_first_zero_skips_full_words() {
    let (_temp, path, bitmap) = setup_temp_bitmap();
    let mut data = vec![0xFFu8; 24];
    data[17] = 0b1111_1011;
    fs::write(&path, &data).unwrap();

    assert_eq!(bitmap.find_first_zero_bit().unwrap(), 17 * 8 + 5);
}

#[test]
fn test_find_first_zero_in_tail_byte() {
    let (_temp, path, bitmap) = setup_temp_bitmap();
    let mut data = vec![0xFFu8; 10];
    data[9] = 0b1111_1110;
    fs::write(&path, &data).unwrap();

    assert_eq!(bitmap.find_first_zero_id().unwrap(), 79);
}

#[test]
fn test_get_id_allocates_sequentially() {
    let (_temp, _path, bitmap) = setup_temp_bitmap();

    assert_eq!(bitmap.get_id().unwrap(), 0);
    assert!(bitmap.contains(0).unwrap());
    assert_eq!(bitmap.get_id().unwrap(), 1);

    for expected in 2..20 {
        assert_eq!(bitmap.get_id().unwrap(), expected);
    }
    assert_eq!(bitmap.read_count().unwrap(), 20);
}

#[test]
fn test_get_id_reuses_freed_id() {
    let (_temp, _path, bitmap) = setup_temp_bitmap();
    for _ in 0..10 {
        bitmap.get_id().unwrap();
    }

    bitmap.update(4, false).unwrap();

    assert_eq!(bitmap.get_id().unwrap(), 4);
    assert_eq!(bitmap.get_id().unwrap(), 10);
}

#[test]
fn test_get_id_extends_into_partially_written_byte() {
    let (_temp, path, bitmap) = setup_temp_bitmap();
    fs::write(&path, [0xFFu8]).unwrap();

    assert_eq!(bitmap.get_id().unwrap(), 8);
    assert_eq!(fs::read(&path).unwrap(), vec![0xFF, 0b1000_0000]);
    assert_eq!(bitmap.get_id().unwrap(), 9);
    assert_eq!(fs::read(&path).unwrap(), vec![0xFF, 0b1100_0000]);
}

// =============================================================================
// Chunk Boundary Tests
// =============================================================================

#[test]
fn test_scans_across_small_chunks() {
    let (_temp, _path, bitmap) = setup_small_chunk_bitmap();
    let ids = [0i64, 7, 63, 64, 100, 191, 192, 500];

    for id in ids {
        bitmap.update(id, true).unwrap();
    }

    assert_eq!(collect_ids(&bitmap), ids.to_vec());
    assert_eq!(bitmap.read_count().unwrap(), ids.len() as u64);
    assert_eq!(bitmap.find_first_zero_id().unwrap(), 1);
}

#[test]
fn test_first_zero_in_later_chunk() {
    let (_temp, path, bitmap) = setup_small_chunk_bitmap();
    let mut data = vec![0xFFu8; 40];
    data[33] = 0b0111_1111;
    fs::write(&path, &data).unwrap();

    assert_eq!(bitmap.find_first_zero_id().unwrap(), 33 * 8);
}

#[test]
fn test_matches_model_set() {
    let (_temp, _path, bitmap) = setup_small_chunk_bitmap();
    let mut model = BTreeSet::new();

    // Deterministic pseudo-random workload
    let mut x: u64 = 0x2545_F491_4F6C_DD1D;
    for _ in 0..400 {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        let id = (x % 700) as i64;
        let state = x & 1 == 0;

        bitmap.update(id, state).unwrap();
        if state {
            model.insert(id);
        } else {
            model.remove(&id);
        }
    }

    assert_eq!(collect_ids(&bitmap), model.iter().copied().collect::<Vec<_>>());
    assert_eq!(bitmap.read_count().unwrap(), model.len() as u64);

    let first_free = (0..).find(|id| !model.contains(id)).unwrap();
    assert_eq!(bitmap.find_first_zero_id().unwrap(), first_free);

    for id in 0..700 {
        assert_eq!(bitmap.contains(id).unwrap(), model.contains(&id), "id {}", id);
    }
}

#[test]
fn test_identical_files_are_identical_bitmaps() {
    let (_temp, path, bitmap) = setup_temp_bitmap();
    for id in [1, 9, 30] {
        bitmap.update(id, true).unwrap();
    }

    let copy_path = path.with_file_name("copy.bin");
    fs::copy(&path, &copy_path).unwrap();
    let copy = BitIds::new(&copy_path);

    assert_eq!(collect_ids(&copy), collect_ids(&bitmap));
    assert_eq!(copy.find_first_zero_id().unwrap(), 0);
}
