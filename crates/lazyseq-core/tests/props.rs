//! Property-based laws for the combinators.

mod common;

use common::{ints, values};
use lazyseq_core::prelude::*;
use proptest::prelude::*;

fn flatten_chunks(chunks: Vec<Value>) -> Vec<Value> {
    chunks
        .into_iter()
        .flat_map(|c| match c {
            Value::List(l) => l,
            other => vec![other],
        })
        .collect()
}

proptest! {
    /// Concatenating all chunks reconstructs the input; every chunk but
    /// possibly the last has exactly `k` elements.
    #[test]
    fn chunkwise_coverage(input in prop::collection::vec(-100i64..100, 0..60), k in 1i64..10) {
        let chunks = values(ints(&input).chunkwise(k));
        for (i, c) in chunks.iter().enumerate() {
            let Value::List(l) = c else { panic!("chunk is not a list") };
            if i + 1 < chunks.len() {
                prop_assert_eq!(l.len(), k as usize);
            } else {
                prop_assert!(l.len() <= k as usize && !l.is_empty());
            }
        }
        let flat = flatten_chunks(chunks);
        let expect: Vec<Value> = input.iter().copied().map(Value::Int).collect();
        prop_assert_eq!(flat, expect);
    }

    /// Consecutive overlapping windows share exactly `o` elements.
    #[test]
    fn chunkwise_overlap_sharing(
        input in prop::collection::vec(-100i64..100, 0..60),
        k in 2i64..8,
        o in 1i64..7,
    ) {
        prop_assume!(o < k);
        let chunks = values(ints(&input).chunkwise_overlap(k, o));
        for w in chunks.windows(2) {
            let (Value::List(a), Value::List(b)) = (&w[0], &w[1]) else {
                panic!("window is not a list")
            };
            prop_assert_eq!(&a[a.len() - o as usize..], &b[..o as usize]);
        }
    }

    /// Zip of two sequences has the shorter length.
    #[test]
    fn zip_takes_shortest(
        a in prop::collection::vec(-100i64..100, 0..40),
        b in prop::collection::vec(-100i64..100, 0..40),
    ) {
        let got = values(zip(vec![ints(&a).boxed(), ints(&b).boxed()]));
        prop_assert_eq!(got.len(), a.len().min(b.len()));
    }

    /// Chain has the summed length and preserves value order.
    #[test]
    fn chain_concatenates(
        a in prop::collection::vec(-100i64..100, 0..40),
        b in prop::collection::vec(-100i64..100, 0..40),
    ) {
        let got = values(chain(vec![ints(&a).boxed(), ints(&b).boxed()]));
        let expect: Vec<Value> = a.iter().chain(b.iter()).copied().map(Value::Int).collect();
        prop_assert_eq!(got, expect);
    }

    /// Pairwise yields `n - 1` pairs for `n >= 2`, none otherwise.
    #[test]
    fn pairwise_count(input in prop::collection::vec(-100i64..100, 0..50)) {
        let got = values(ints(&input).pairwise());
        prop_assert_eq!(got.len(), input.len().saturating_sub(1));
    }

    /// Sorting emits a weakly increasing permutation of its input.
    #[test]
    fn sort_is_an_ordered_permutation(input in prop::collection::vec(-100i64..100, 0..50)) {
        let got = values(ints(&input).sorted());
        let mut expect: Vec<i64> = input.clone();
        expect.sort_unstable();
        let expect: Vec<Value> = expect.into_iter().map(Value::Int).collect();
        prop_assert_eq!(got, expect);
    }

    /// Relative frequencies of a non-empty input sum to 1.
    #[test]
    fn relative_frequencies_sum_law(input in prop::collection::vec(-5i64..5, 1..60)) {
        let sum: f64 = ints(&input)
            .relative_frequencies(true)
            .map(|r| r.unwrap().1)
            .sum();
        prop_assert!((sum - 1.0).abs() < 1e-4, "sum = {}", sum);
    }

    /// The seed is always the first emitted scan value.
    #[test]
    fn scan_seed_is_first(input in prop::collection::vec(-100i64..100, 0..30), seed in -100i64..100) {
        let got = values(ints(&input).running_total(Some(Value::Int(seed))));
        prop_assert_eq!(got.len(), input.len() + 1);
        prop_assert_eq!(&got[0], &Value::Int(seed));
    }
}
