#![no_main]

use cardinality_sketch::{HyperLogLog, WyHash64};
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut a = HyperLogLog::with_hash(10, Box::new(WyHash64::new())).unwrap();
    for chunk in first_half.chunks(4) {
        a.write(chunk).unwrap();
        assert!(a.count() >= 0.0);
    }

    let mut b = HyperLogLog::with_hash(10, Box::new(WyHash64::new())).unwrap();
    for chunk in second_half.chunks(4) {
        b.write(chunk).unwrap();
        assert!(b.count() >= 0.0);
    }

    a.merge(&b).unwrap();
    assert!(a.count().is_finite());
});
