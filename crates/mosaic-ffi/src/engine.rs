// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Foreign Function Interface (FFI) for the Mosaic Layout Engine
//!
//! This module provides a stable, C-compatible ABI for computing calendar
//! block layouts. It handles engine instantiation, configuration, layout
//! computation, and result inspection.
//!
//! ## Usage Lifecycle
//!
//! 1.  **Instantiation**: Create an engine via `mosaic_engine_new`.
//! 2.  **Configuration** (optional): Call `mosaic_engine_configure` to
//!     override the default options.
//! 3.  **Computation**: Call `mosaic_engine_compute` with a flat
//!     `[start0, end0, start1, end1, ...]` minute buffer. The return code
//!     signals success or failure.
//! 4.  **Inspection**: Read per-block geometry via `mosaic_engine_get_left`
//!     and `mosaic_engine_get_width`, aggregates via `mosaic_engine_get_sum`
//!     and `mosaic_engine_get_sum_sq`.
//! 5.  **Cleanup**: Free the engine via `mosaic_engine_free`.
//!
//! ## Safety
//!
//! This module uses `unsafe` code to handle raw pointers. Callers **must**
//! ensure:
//!
//! * **Pointer Validity**: Pointers must be valid and allocated by this library.
//! * **Ownership**: `mosaic_engine_free` invalidates the passed pointer immediately.
//! * **Null Pointers**: Passing `NULL` will strictly **panic** (abort the process).
//!
//! ## Exported Functions
//!
//! ### 1. Engine Lifecycle
//! * `mosaic_engine_new`
//! * `mosaic_engine_free`
//!
//! ### 2. Configuration
//! * `mosaic_engine_configure`
//!
//! ### 3. Computation
//! * `mosaic_engine_compute`
//!
//! ### 4. Result Inspection
//! * `mosaic_engine_get_left`
//! * `mosaic_engine_get_width`
//! * `mosaic_engine_get_sum`
//! * `mosaic_engine_get_sum_sq`
//! * `mosaic_engine_total_rooms`

use mosaic_model::options::{LayoutOptions, LpModelKind, SchedulerKind};
use mosaic_solver::{engine::LayoutEngine, error::LayoutError};
use std::slice;
use std::time::Duration;

/// Return code of a successful compute.
pub const MOSAIC_OK: i32 = 0;
/// Return code when an allocation failed.
pub const MOSAIC_ERR_CAPACITY: i32 = -1;
/// Return code when an LP or MILP solve failed.
pub const MOSAIC_ERR_SOLVER: i32 = -2;

/// Creates a new layout engine with default options.
#[no_mangle]
pub extern "C" fn mosaic_engine_new() -> *mut LayoutEngine {
    Box::into_raw(Box::new(LayoutEngine::new()))
}

/// Frees a layout engine allocated by `mosaic_engine_new`.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by `mosaic_engine_new`. The pointer is invalid after
/// this call.
#[no_mangle]
pub unsafe extern "C" fn mosaic_engine_free(ptr: *mut LayoutEngine) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Replaces the engine options.
///
/// `scheduler` selects the room assignment strategy (`1` the greedy
/// scan, any other value the heap scheduler). `lp_model` selects the
/// relaxation (`2` the uniform width model, any other value per-block
/// widths).
/// Boolean flags treat `0` as false and everything else as true.
/// Negative `lp_iteration_limit` or `milp_time_limit_ms` values are
/// clamped to zero.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by `mosaic_engine_new`.
#[no_mangle]
pub unsafe extern "C" fn mosaic_engine_configure(
    ptr: *mut LayoutEngine,
    room_tolerance: i16,
    scheduler: i32,
    apply_dfs_expansion: i32,
    graph_tolerance: i16,
    lp_iteration_limit: i32,
    lp_model: i32,
    exact_milp: i32,
    milp_time_limit_ms: i64,
) {
    assert!(
        !ptr.is_null(),
        "called `mosaic_engine_configure` with null pointer"
    );
    let engine = &mut *ptr;

    *engine.options_mut() = LayoutOptions {
        room_tolerance,
        scheduler: if scheduler == 1 {
            SchedulerKind::Greedy
        } else {
            SchedulerKind::Heap
        },
        apply_dfs_expansion: apply_dfs_expansion != 0,
        graph_tolerance,
        lp_iteration_limit: lp_iteration_limit.max(0) as usize,
        lp_model: if lp_model == 2 {
            LpModelKind::UniformWidth
        } else {
            LpModelKind::PerBlockWidth
        },
        exact_milp: exact_milp != 0,
        milp_time_limit: Duration::from_millis(milp_time_limit_ms.max(0) as u64),
    };
}

/// Computes the layout for `n` blocks.
///
/// `starts_ends` points to `2 * n` minutes laid out as
/// `[start0, end0, start1, end1, ...]` with `start <= end` per pair.
/// Returns `MOSAIC_OK` on success, `MOSAIC_ERR_CAPACITY` when an
/// allocation failed, or `MOSAIC_ERR_SOLVER` when an LP or MILP solve
/// failed. Results of the previous compute stay readable only after
/// `MOSAIC_OK`.
///
/// # Panics
///
/// This function will panic if `starts_ends` is null while `n > 0`, or
/// if any pair has `start > end`.
///
/// # Safety
///
/// This function is unsafe because it dereferences raw pointers.
/// The caller must ensure that the engine pointer was allocated by
/// `mosaic_engine_new` and that `starts_ends` points to at least
/// `2 * n` readable `i16` values.
#[no_mangle]
pub unsafe extern "C" fn mosaic_engine_compute(
    ptr: *mut LayoutEngine,
    starts_ends: *const i16,
    n: usize,
) -> i32 {
    assert!(
        !ptr.is_null(),
        "called `mosaic_engine_compute` with null pointer"
    );
    let engine = &mut *ptr;

    let spans: Vec<(i16, i16)> = if n == 0 {
        Vec::new()
    } else {
        assert!(
            !starts_ends.is_null(),
            "called `mosaic_engine_compute` with null span buffer"
        );
        slice::from_raw_parts(starts_ends, 2 * n)
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    };

    match engine.compute(&spans) {
        Ok(_) => MOSAIC_OK,
        Err(LayoutError::Capacity(_)) => MOSAIC_ERR_CAPACITY,
        Err(LayoutError::Lp(_)) => MOSAIC_ERR_SOLVER,
    }
}

/// Returns the normalized left edge of block `index`, in input order.
///
/// # Panics
///
/// This function will panic if the index is out of bounds for the most
/// recent compute.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by `mosaic_engine_new`.
#[no_mangle]
pub unsafe extern "C" fn mosaic_engine_get_left(ptr: *const LayoutEngine, index: usize) -> f64 {
    assert!(
        !ptr.is_null(),
        "called `mosaic_engine_get_left` with null pointer"
    );
    let engine = &*ptr;

    let lefts = engine.layout().lefts();
    assert!(
        index < lefts.len(),
        "called `mosaic_engine_get_left` with index out of bounds: the len is {} but the index is {}",
        lefts.len(),
        index
    );
    lefts[index]
}

/// Returns the normalized width of block `index`, in input order.
///
/// # Panics
///
/// This function will panic if the index is out of bounds for the most
/// recent compute.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by `mosaic_engine_new`.
#[no_mangle]
pub unsafe extern "C" fn mosaic_engine_get_width(ptr: *const LayoutEngine, index: usize) -> f64 {
    assert!(
        !ptr.is_null(),
        "called `mosaic_engine_get_width` with null pointer"
    );
    let engine = &*ptr;

    let widths = engine.layout().widths();
    assert!(
        index < widths.len(),
        "called `mosaic_engine_get_width` with index out of bounds: the len is {} but the index is {}",
        widths.len(),
        index
    );
    widths[index]
}

/// Returns the sum of all block widths scaled by 100.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by `mosaic_engine_new`.
#[no_mangle]
pub unsafe extern "C" fn mosaic_engine_get_sum(ptr: *const LayoutEngine) -> f64 {
    assert!(
        !ptr.is_null(),
        "called `mosaic_engine_get_sum` with null pointer"
    );
    (*ptr).layout().sum()
}

/// Returns the sum of squares of all block widths scaled by 100.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by `mosaic_engine_new`.
#[no_mangle]
pub unsafe extern "C" fn mosaic_engine_get_sum_sq(ptr: *const LayoutEngine) -> f64 {
    assert!(
        !ptr.is_null(),
        "called `mosaic_engine_get_sum_sq` with null pointer"
    );
    (*ptr).layout().sum_sq()
}

/// Returns the room count of the most recent compute.
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer.
/// The caller must ensure that the pointer is valid and was
/// allocated by `mosaic_engine_new`.
#[no_mangle]
pub unsafe extern "C" fn mosaic_engine_total_rooms(ptr: *const LayoutEngine) -> usize {
    assert!(
        !ptr.is_null(),
        "called `mosaic_engine_total_rooms` with null pointer"
    );
    (*ptr).statistics().total_rooms
}
