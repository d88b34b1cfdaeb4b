//! Infix operator sugar over the combinator methods.
//!
//! `&` intersection, `|` union, `^` symmetric difference, `-` difference,
//! `!` complement. Implemented for owned volumes and references; both go
//! through the same folding rules as the named methods.

use std::ops::{BitAnd, BitOr, BitXor, Not, Sub};

use super::volume::Volume;

macro_rules! binary_operator {
    ($op_trait:ident, $method:ident, $combinator:ident) => {
        impl<P> $op_trait for Volume<P> {
            type Output = Volume<P>;

            fn $method(self, rhs: Volume<P>) -> Volume<P> {
                self.$combinator(&rhs)
            }
        }

        impl<'a, P> $op_trait<&'a Volume<P>> for &'a Volume<P> {
            type Output = Volume<P>;

            fn $method(self, rhs: &'a Volume<P>) -> Volume<P> {
                self.$combinator(rhs)
            }
        }

        impl<'a, P> $op_trait<&'a Volume<P>> for Volume<P> {
            type Output = Volume<P>;

            fn $method(self, rhs: &'a Volume<P>) -> Volume<P> {
                self.$combinator(rhs)
            }
        }
    };
}

binary_operator!(BitAnd, bitand, and_with);
binary_operator!(BitOr, bitor, or_with);
binary_operator!(BitXor, bitxor, xor_with);
binary_operator!(Sub, sub, sub_with);

impl<P> Not for Volume<P> {
    type Output = Volume<P>;

    fn not(self) -> Volume<P> {
        self.negate()
    }
}

impl<P> Not for &Volume<P> {
    type Output = Volume<P>;

    fn not(self) -> Volume<P> {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use crate::cv::Identity;
    use crate::volumes::{Volume, VolumeKind};

    #[test]
    fn operators_match_methods() {
        let cv = Identity::new("Id").shared();
        let a = Volume::interval(cv.clone(), -0.5, 0.5).unwrap();
        let b = Volume::interval(cv, 0.25, 0.75).unwrap();

        assert_eq!(&a & &b, a.and_with(&b));
        assert_eq!(&a | &b, a.or_with(&b));
        assert_eq!(&a ^ &b, a.xor_with(&b));
        assert_eq!(&a - &b, a.sub_with(&b));
        assert_eq!(!&a, a.negate());
        assert_eq!(a.clone() & b.clone(), a.and_with(&b));
        assert_eq!(a.clone() | &b, a.or_with(&b));
        assert_eq!(!!a.clone(), a);
    }

    #[test]
    fn autocombinations() {
        let cv = Identity::new("Id").shared();
        let a = Volume::interval(cv, -0.5, 0.5).unwrap();
        assert_eq!(&a | &a, a);
        assert_eq!(&a & &a, a);
        assert_eq!(&a ^ &a, Volume::empty());
    }

    #[test]
    fn chained_expression() {
        let cv = Identity::new("Id").shared();
        let a = Volume::interval(cv.clone(), 0.0, 1.0).unwrap();
        let b = Volume::interval(cv.clone(), 2.0, 3.0).unwrap();
        let c = Volume::interval(cv, 0.5, 2.5).unwrap();
        let v = (&a | &b) - &c;
        assert_eq!(v.kind(), VolumeKind::Sub);
        assert!(v.evaluate(&0.25));
        assert!(!v.evaluate(&0.75));
        assert!(!v.evaluate(&2.25));
        assert!(v.evaluate(&2.75));
    }
}
