//!
//! DSA-related constants (like parameter sizes)
//!

macro_rules! define_param_size {
    ($l:literal, $n:literal) => {
        ::paste::paste! {
            #[doc = "DSA parameter size constant; L = " $l ", N = " $n]
            pub const [<DSA_ $l _ $n>]: (u32, u32) = ($l, $n);
        }
    };
    (deprecated: $l:literal, $n:literal) => {
        ::paste::paste! {
            #[deprecated(note="This size constant has a security strength of under 112 bits per SP 800-57 Part 1 Rev. 5")]
            #[doc = "DSA parameter size constant; L = " $l ", N = " $n]
            pub const [<DSA_ $l _ $n>]: (u32, u32) = ($l, $n);
        }
    };
}

define_param_size!(deprecated: 1024, 160);
define_param_size!(2048, 224);
define_param_size!(2048, 256);
define_param_size!(3072, 256);

/// The (L, N) pairs approved by FIPS 186-4 section 4.2
#[allow(deprecated)]
pub(crate) const SUPPORTED_SIZES: [(u32, u32); 4] =
    [DSA_1024_160, DSA_2048_224, DSA_2048_256, DSA_3072_256];

/// Check whether the requested pair is one of the approved combinations
pub(crate) fn is_supported(size: (u32, u32)) -> bool {
    SUPPORTED_SIZES.contains(&size)
}
