//! Field chain resolution
//!
//! Walks `base->f1->f2->...` one member at a time, querying the layout of
//! the struct reached so far and accumulating byte offsets. The base is
//! always assumed to be held through a pointer, so the first member opens
//! the first dereference step.

use crate::domain::{ChainExpr, LayoutError, Member, OffsetChain, ResolveError};
use crate::layout::StructLayoutProvider;
use log::debug;
use serde::Serialize;

/// Outcome of resolving one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub base: String,
    pub members: Vec<Member>,
    pub offsets: OffsetChain,
    /// Type reached after the last member
    pub final_struct: String,
}

impl Resolution {
    /// Nested dereference expression around `placeholder`.
    #[must_use]
    pub fn expression(&self, placeholder: &str) -> String {
        self.offsets.render(placeholder)
    }
}

pub struct Resolver<P> {
    provider: P,
}

impl<P: StructLayoutProvider> Resolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Resolve a chain without progress reporting.
    ///
    /// # Errors
    /// See [`Resolver::resolve_with`].
    pub fn resolve(&self, expr: &ChainExpr) -> Result<Resolution, ResolveError> {
        self.resolve_with(expr, |_| {})
    }

    /// Resolve a chain, calling `on_member` as each member is found.
    ///
    /// # Errors
    /// - `FieldNotFound` if a field is not a member of the struct reached so far
    /// - `OffsetOverflow` if folding an inline member overflows the current step
    /// - `Layout` if the layout query itself failed
    ///
    /// Either aborts the whole resolution.
    pub fn resolve_with<F>(
        &self,
        expr: &ChainExpr,
        mut on_member: F,
    ) -> Result<Resolution, ResolveError>
    where
        F: FnMut(&Member),
    {
        let mut current = expr.base.clone();
        let mut last_was_pointer = true;
        let mut offsets = OffsetChain::new();
        let mut members = Vec::with_capacity(expr.fields.len());

        for field in &expr.fields {
            let member = self.provider.lookup(&current, field)?.ok_or_else(|| {
                ResolveError::FieldNotFound { structure: current.clone(), field: field.clone() }
            })?;
            on_member(&member);

            offsets.step(member.offset, last_was_pointer).ok_or_else(|| {
                ResolveError::OffsetOverflow { structure: current.clone(), field: field.clone() }
            })?;
            debug!("{current}->{field}: offsets now {:?}", offsets.as_slice());

            current.clone_from(&member.type_name);
            last_was_pointer = member.is_pointer;
            members.push(member);
        }

        Ok(Resolution { base: expr.base.clone(), members, offsets, final_struct: current })
    }

    /// Member listing of the struct a resolution ended on.
    ///
    /// # Errors
    /// Returns an error if the layout query failed.
    pub fn dump_final(&self, resolution: &Resolution) -> Result<String, LayoutError> {
        self.provider.dump(&resolution.final_struct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StaticLayouts;
    use std::cell::RefCell;

    fn layouts() -> StaticLayouts {
        StaticLayouts::new()
            .with(
                "task_struct",
                "\tstruct thread_info         thread_info;          /*     0    24 */\n\
                 \tstruct mm_struct *         mm;                   /*    72     8 */\n",
            )
            .with(
                "thread_info",
                "\tlong unsigned int          flags;                /*     8     8 */\n",
            )
    }

    #[test]
    fn test_single_pointer_field() {
        let resolver = Resolver::new(layouts());
        let res = resolver.resolve(&ChainExpr::parse("task_struct->mm")).unwrap();
        assert_eq!(res.offsets.as_slice(), &[72]);
        assert_eq!(res.expression("_"), "+72(_)");
        assert_eq!(res.final_struct, "mm_struct");
    }

    #[test]
    fn test_inline_then_scalar_folds() {
        let resolver = Resolver::new(layouts());
        let res = resolver.resolve(&ChainExpr::parse("task_struct->thread_info->flags")).unwrap();
        assert_eq!(res.offsets.as_slice(), &[8]);
        assert_eq!(res.expression("_"), "+8(_)");
    }

    #[test]
    fn test_missing_field_aborts() {
        let resolver = Resolver::new(layouts());
        let err = resolver.resolve(&ChainExpr::parse("task_struct->nope->mm")).unwrap_err();
        match err {
            ResolveError::FieldNotFound { structure, field } => {
                assert_eq!(structure, "task_struct");
                assert_eq!(field, "nope");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_progress_callback_sees_each_member() {
        let resolver = Resolver::new(layouts());
        let seen = RefCell::new(Vec::new());
        resolver
            .resolve_with(&ChainExpr::parse("task_struct->thread_info->flags"), |m| {
                seen.borrow_mut().push(m.name.clone());
            })
            .unwrap();
        assert_eq!(seen.into_inner(), vec!["thread_info", "flags"]);
    }

    #[test]
    fn test_fold_overflow_aborts() {
        // inline member at u64::MAX, then one more byte
        let layouts = StaticLayouts::new()
            .with(
                "outer",
                "\tstruct inner               inner;                /* 18446744073709551615     8 */\n",
            )
            .with(
                "inner",
                "\tint                        x;                    /*     1     4 */\n",
            );
        let err =
            Resolver::new(layouts).resolve(&ChainExpr::parse("outer->inner->x")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::OffsetOverflow { ref structure, ref field }
                if structure == "inner" && field == "x"
        ));
    }

    #[test]
    fn test_empty_chain() {
        let resolver = Resolver::new(layouts());
        let res = resolver.resolve(&ChainExpr::parse("task_struct")).unwrap();
        assert!(res.offsets.is_empty());
        assert_eq!(res.expression("_"), "_");
        assert_eq!(res.final_struct, "task_struct");
    }
}
