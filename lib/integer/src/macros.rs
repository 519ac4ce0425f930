//! Operator-forwarding macros.
//!
//! Each binary operation is implemented once, for `T op &T`, and these
//! macros derive the remaining owned/borrowed combinations from it.

/// Forward `T op T`, `&T op &T` and `&T op T` to the base `T op &T` impl.
macro_rules! forward_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl $imp<$res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                $imp::$method(self, &other)
            }
        }

        impl $imp<&$res> for &$res {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$res) -> $res {
                $imp::$method(self.clone(), other)
            }
        }

        impl $imp<$res> for &$res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                $imp::$method(self.clone(), &other)
            }
        }
    };
}

/// Forward `T op= T` to the base `T op= &T` impl.
macro_rules! forward_assign {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl $imp<$res> for $res {
            #[inline]
            fn $method(&mut self, other: $res) {
                $imp::$method(self, &other);
            }
        }
    };
}
