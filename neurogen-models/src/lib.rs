//! Library defining the models bred by the generation manager
#![warn(missing_docs, unused)]

#[macro_use]
extern crate serde_derive;

/// Defines neural networks
pub mod nn;

// Plain dot product over the shorter of the two slices
fn dot(x: &[f32], y: &[f32]) -> f32 {
    x.iter().zip(y.iter()).map(|(a, b)| a * b).sum()
}

#[cfg(test)]
mod tests {
    use super::dot;

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1., 2., 3.], &[4., 5., 6.]), 32.);
        assert_eq!(dot(&[], &[]), 0.);
    }
}
