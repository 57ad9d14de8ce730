// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers shared by the transform engine.

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("pathstream requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn sin_cos(self) -> (Self, Self) => sincos;
    fn tan(self) -> Self => tan;
}

/// Converts an angle in degrees, as written in transform attributes, to radians.
#[inline]
pub(crate) fn degrees(deg: f64) -> f64 {
    deg * (core::f64::consts::PI / 180.0)
}
