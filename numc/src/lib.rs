/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! A dense, row-major `f64` matrix engine.
//!
//! Root matrices own a backing buffer. Views created with [`Matrix::allocate_view`] alias a
//! rectangular region of that buffer and keep it alive through a shared reference count;
//! the buffer is freed exactly when the last handle (root or view) is released.
//!
//! Kernels take a pre-allocated `result` matrix. Because `result` may share storage with an
//! operand (for example `multiply(&a, &a, &a)`), every kernel takes `&Matrix` and reads
//! overlapping operands through a snapshot taken before the first write.

pub mod error;
pub use error::{DataProblem, MatrixError, ShapeProblem};

pub mod shape;
pub use shape::Shape;

pub mod storage;
pub use storage::{BufferProbe, Matrix};

mod access;
mod alias;

pub mod kernels;
pub mod linalg;

pub mod random;
pub use random::RandomFill;

pub mod logging;
