#[macro_export]
macro_rules! impl_argument_list {
    ($arity:expr => $($name:ident),+) => {
        impl<$($name),+> $crate::key::ArgumentList for ($($name,)+) {
            const ARITY: usize = $arity;
        }
    };
}

impl_argument_list!(1 => A);
impl_argument_list!(2 => A, B);
impl_argument_list!(3 => A, B, C);
impl_argument_list!(4 => A, B, C, D);
impl_argument_list!(5 => A, B, C, D, E);
impl_argument_list!(6 => A, B, C, D, E, F);
impl_argument_list!(7 => A, B, C, D, E, F, G);
impl_argument_list!(8 => A, B, C, D, E, F, G, H);
impl_argument_list!(9 => A, B, C, D, E, F, G, H, I);
impl_argument_list!(10 => A, B, C, D, E, F, G, H, I, J);
impl_argument_list!(11 => A, B, C, D, E, F, G, H, I, J, K);
impl_argument_list!(12 => A, B, C, D, E, F, G, H, I, J, K, L);
