#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList
//
// Tests random sequences of push_front, pop_back, move_to_front, remove and
// clear. Handles may go stale and later alias a reused slot; the list must
// stay well-formed either way.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u32> = RecencyList::new();
    let mut ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 5;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                // push_front
                let id = list.push_front(value);
                ids.push(id);
                assert_eq!(list.front(), Some(&value));
                assert!(list.contains(id));
            }
            1 => {
                // pop_back
                let old_len = list.len();
                let expected = list.back().copied();
                let popped = list.pop_back();
                assert_eq!(popped, expected);
                if popped.is_some() {
                    assert_eq!(list.len(), old_len - 1);
                }
            }
            2 => {
                // move_to_front
                if !ids.is_empty() {
                    let id = ids[value as usize % ids.len()];
                    if list.move_to_front(id) {
                        assert_eq!(list.front(), list.get(id));
                    }
                }
            }
            3 => {
                // remove
                if !ids.is_empty() {
                    let id = ids[value as usize % ids.len()];
                    let old_len = list.len();
                    if list.remove(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }
                }
            }
            4 => {
                if value == 0 {
                    list.clear();
                    ids.clear();
                    assert!(list.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(list.iter().count(), list.len());
        assert_eq!(list.front().is_some(), !list.is_empty());
        assert_eq!(list.back().is_some(), !list.is_empty());
    }
});
