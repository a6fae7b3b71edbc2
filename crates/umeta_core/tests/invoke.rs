//! Invocation through bound functions and methods, end to end.
//!
//! Covers the argument category table (which caller values bind to which
//! parameter kinds), the fixed order of invocation checks, and the
//! agreement between `is_invocable_with` and `try_invoke`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use umeta_core::{
    ErrorCode, FunctionState, MethodState, Registry, ReturnPolicy, RvalueRef, Uarg, Uvalue,
};

fn add(lhs: i32, rhs: i32) -> i32 {
    lhs.wrapping_add(rhs)
}

fn by_value(value: i32) -> i32 {
    value
}

fn by_ref(value: &i32) -> i32 {
    *value
}

fn by_mut(value: &mut i32) -> i32 {
    *value += 1;
    *value
}

fn by_rvalue(mut value: RvalueRef<'_, i32>) -> i32 {
    *value *= 2;
    *value
}

#[derive(Clone, Debug, PartialEq)]
struct Ledger {
    entries: Vec<i64>,
}

impl Ledger {
    fn total(&self) -> i64 {
        self.entries.iter().sum()
    }

    fn record(&mut self, amount: i64) {
        self.entries.push(amount);
    }

    fn into_entries(self) -> Vec<i64> {
        self.entries
    }
}

umeta_core::reflect!(class Ledger: Clone, PartialEq, Debug);

fn total_or_zero(ledger: Option<&Ledger>) -> i64 {
    ledger.map_or(0, Ledger::total)
}

fn reset(ledger: Option<&mut Ledger>) -> bool {
    ledger.map(|ledger| ledger.entries.clear()).is_some()
}

// === Argument category table ===

#[derive(Debug, Clone, Copy)]
enum Caller {
    Lvalue,
    ConstLvalue,
    Rvalue,
    ConstRvalue,
}

const CALLERS: [Caller; 4] = [
    Caller::Lvalue,
    Caller::ConstLvalue,
    Caller::Rvalue,
    Caller::ConstRvalue,
];

fn accepts(registry: &Registry, function: &FunctionState, caller: Caller) -> bool {
    let mut value = 3_i32;
    let arg = match caller {
        Caller::Lvalue => Uarg::lvalue(registry, &mut value),
        Caller::ConstLvalue => Uarg::const_lvalue(registry, &value),
        Caller::Rvalue => Uarg::rvalue(registry, value),
        Caller::ConstRvalue => Uarg::const_rvalue(registry, value),
    };
    function.is_invocable_with(registry, vec![arg])
}

#[test]
fn category_table() {
    let registry = Registry::new();
    let cases = [
        (FunctionState::make(&registry, "v", by_value, ReturnPolicy::AsCopy), [true, true, true, true]),
        (FunctionState::make(&registry, "r", by_ref, ReturnPolicy::AsCopy), [true, true, true, true]),
        (FunctionState::make(&registry, "m", by_mut, ReturnPolicy::AsCopy), [true, false, false, false]),
        (FunctionState::make(&registry, "rr", by_rvalue, ReturnPolicy::AsCopy), [true, false, true, false]),
    ];
    for (function, expected) in cases {
        for (caller, expected) in CALLERS.into_iter().zip(expected) {
            assert_eq!(
                accepts(&registry, &function, caller),
                expected,
                "{} with {caller:?}",
                function.name()
            );
        }
    }
}

#[test]
fn writes_reach_the_caller() {
    let registry = Registry::new();
    let function = FunctionState::make(&registry, "m", by_mut, ReturnPolicy::AsCopy);
    let mut value = 41_i32;
    let result = function.invoke(&registry, (&mut value,));
    assert_eq!(result.cast::<i32>(), Ok(&42));
    assert_eq!(value, 42);

    let doubled = FunctionState::make(&registry, "rr", by_rvalue, ReturnPolicy::AsCopy);
    assert_eq!(doubled.invoke(&registry, (5_i32,)).cast::<i32>(), Ok(&10));
}

// === Check order ===

#[test]
fn method_checks_run_arity_then_instance_then_arguments() {
    let registry = Registry::new();
    let record = MethodState::make(&registry, "record", Ledger::record, ReturnPolicy::AsCopy).unwrap();
    let mut ledger = Ledger { entries: vec![] };

    let mut foreign = Uvalue::new(0_u8);
    let mut stored = Uvalue::new(ledger.clone());

    let result = record.try_invoke(&registry, &mut foreign, ());
    assert_eq!(result.err(), Some(ErrorCode::ArityMismatch));
    let result = record.try_invoke(&registry, &mut foreign, ("x",));
    assert_eq!(result.err(), Some(ErrorCode::InstanceTypeMismatch));
    let result = record.try_invoke(&registry, &mut stored, ("x",));
    assert_eq!(result.err(), Some(ErrorCode::ArgumentTypeMismatch));
    let result = record.try_invoke(&registry, &stored, (3_i64,));
    assert_eq!(result.err(), Some(ErrorCode::InstanceTypeMismatch));

    record.invoke(&registry, &mut stored, (3_i64,));
    assert_eq!(stored.cast::<Ledger>().map(Ledger::total), Ok(3));

    record.invoke(&registry, &mut ledger, (4_i64,));
    assert_eq!(ledger.entries, vec![4]);
}

#[test]
fn mutable_method_accepts_temporaries() {
    let registry = Registry::new();
    let record = MethodState::make(&registry, "record", Ledger::record, ReturnPolicy::AsCopy).unwrap();
    let ledger = Ledger { entries: vec![1] };

    assert!(record.is_invocable_with(&registry, ledger.clone(), (2_i64,)));
    assert!(record.is_invocable_with(&registry, Uvalue::new(ledger.clone()), (2_i64,)));
    assert!(record.is_invocable_with_types::<Ledger, (i64,)>(&registry));
    assert_eq!(record.try_invoke(&registry, ledger.clone(), (2_i64,)).err(), None);
    assert_eq!(record.try_invoke(&registry, Uvalue::new(ledger.clone()), (2_i64,)).err(), None);

    // Constness still blocks the write.
    assert!(!record.is_invocable_with(&registry, &ledger, (2_i64,)));
    assert!(!record.is_invocable_with_types::<&Ledger, (i64,)>(&registry));
    assert_eq!(ledger.entries, vec![1]);
}

#[test]
fn optional_references_cross_as_pointers() {
    let registry = Registry::new();
    let total = FunctionState::make(&registry, "total_or_zero", total_or_zero, ReturnPolicy::AsCopy);
    let reset = FunctionState::make(&registry, "reset", reset, ReturnPolicy::AsCopy);
    let mut ledger = Ledger { entries: vec![4, 5] };

    assert_eq!(total.invoke(&registry, (Some(&ledger),)).cast::<i64>(), Ok(&9));
    assert_eq!(total.invoke(&registry, (None::<&Ledger>,)).cast::<i64>(), Ok(&0));
    assert!(total.is_invocable_with_types::<(Option<&Ledger>,)>(&registry));
    // A mutable pointer also binds a read-only pointer parameter.
    assert!(total.is_invocable_with(&registry, (Some(&mut ledger),)));

    assert!(!reset.is_invocable_with(&registry, (Some(&ledger),)));
    assert_eq!(reset.invoke(&registry, (Some(&mut ledger),)).cast::<bool>(), Ok(&true));
    assert!(ledger.entries.is_empty());
}

#[test]
fn by_value_receiver_consumes_rvalue() {
    let registry = Registry::new();
    let into_entries =
        MethodState::make(&registry, "into_entries", Ledger::into_entries, ReturnPolicy::AsCopy)
            .unwrap();
    let ledger = Ledger { entries: vec![1, 2] };
    assert!(!into_entries.is_invocable_with(&registry, Uvalue::new(0_u8), ()));
    let result = into_entries.invoke(&registry, ledger.clone(), ());
    assert_eq!(result.cast::<Vec<i64>>(), Ok(&vec![1, 2]));
    // A copyable lvalue receiver is copied.
    let result = into_entries.invoke(&registry, &ledger, ());
    assert_eq!(result.cast::<Vec<i64>>().map(Vec::len), Ok(2));
}

#[test]
fn const_method_accepts_every_receiver_category() {
    let registry = Registry::new();
    let total = MethodState::make(&registry, "total", Ledger::total, ReturnPolicy::AsCopy).unwrap();
    let mut ledger = Ledger { entries: vec![2, 3] };
    assert_eq!(total.invoke(&registry, &ledger, ()).cast::<i64>(), Ok(&5));
    assert_eq!(total.invoke(&registry, &mut ledger, ()).cast::<i64>(), Ok(&5));
    assert_eq!(total.invoke(&registry, ledger.clone(), ()).cast::<i64>(), Ok(&5));
    assert_eq!(total.invoke(&registry, Some(&ledger), ()).cast::<i64>(), Ok(&5));
    assert_eq!(
        total.try_invoke(&registry, None::<&Ledger>, ()).err(),
        Some(ErrorCode::InstanceTypeMismatch)
    );
}

#[test]
fn free_function_reports_each_failure() {
    let registry = Registry::new();
    let function = FunctionState::make(&registry, "add", add, ReturnPolicy::AsCopy);
    assert_eq!(function.try_invoke(&registry, (1_i32, 2_i32)).unwrap(), Uvalue::new(3_i32));
    assert_eq!(
        function.try_invoke(&registry, (1_i32,)).err(),
        Some(ErrorCode::ArityMismatch)
    );
    assert_eq!(
        function.try_invoke(&registry, (1_i32, "x")).err(),
        Some(ErrorCode::ArgumentTypeMismatch)
    );
    assert!(!function.is_invocable_with(&registry, (1_i32, "x")));
}

#[test]
#[should_panic(expected = "arity mismatch")]
fn invoke_panics_with_the_error_code() {
    let registry = Registry::new();
    let function = FunctionState::make(&registry, "add", add, ReturnPolicy::AsCopy);
    function.invoke(&registry, (1_i32,));
}

// === Properties ===

proptest! {
    #[test]
    fn add_matches_direct_call(lhs in any::<i32>(), rhs in any::<i32>()) {
        let registry = Registry::new();
        let function = FunctionState::make(&registry, "add", add, ReturnPolicy::AsCopy);
        let result = function.invoke(&registry, (lhs, rhs));
        prop_assert_eq!(result.cast::<i32>().copied(), Ok(add(lhs, rhs)));
    }

    #[test]
    fn type_check_agrees_with_invocation(lhs in any::<i32>(), rhs in any::<i64>()) {
        let registry = Registry::new();
        let function = FunctionState::make(&registry, "add", add, ReturnPolicy::AsCopy);
        prop_assert!(!function.is_invocable_with(&registry, (lhs, rhs)));
        prop_assert_eq!(
            function.try_invoke(&registry, (lhs, rhs)).err(),
            Some(ErrorCode::ArgumentTypeMismatch)
        );
        prop_assert!(function.is_invocable_with(&registry, (lhs, lhs)));
    }

    #[test]
    fn uvalue_holds_exact_type(value in any::<i64>()) {
        let stored = Uvalue::new(value);
        prop_assert_eq!(stored.cast::<i64>().copied(), Ok(value));
        prop_assert_eq!(stored.cast::<i32>().err(), Some(ErrorCode::BadCast));
        prop_assert_eq!(stored.cast::<u64>().err(), Some(ErrorCode::BadCast));
        prop_assert_eq!(stored.try_clone().unwrap(), Uvalue::new(value));
    }
}
