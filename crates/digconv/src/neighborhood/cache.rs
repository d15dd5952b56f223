//! Memo of the convexity properties evaluated for the current center.

/// Properties the analyzer can evaluate on its window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocalProperty {
    /// Full convexity of the part of X in the window.
    FullConvexity,
    /// Full convexity of the part of the complement of X in the window.
    ComplementFullConvexity,
    /// 0-convexity of the part of X in the window.
    ZeroConvexity,
    /// 0-convexity of the part of the complement of X in the window.
    ComplementZeroConvexity,
}

impl LocalProperty {
    pub const ALL: [LocalProperty; 4] = [
        LocalProperty::FullConvexity,
        LocalProperty::ComplementFullConvexity,
        LocalProperty::ZeroConvexity,
        LocalProperty::ComplementZeroConvexity,
    ];

    /// `true` for the two properties evaluated on the complement of X.
    #[inline]
    pub fn on_complement(self) -> bool {
        matches!(
            self,
            LocalProperty::ComplementFullConvexity | LocalProperty::ComplementZeroConvexity
        )
    }

    /// `true` for the two full convexity properties.
    #[inline]
    pub fn is_full(self) -> bool {
        matches!(
            self,
            LocalProperty::FullConvexity | LocalProperty::ComplementFullConvexity
        )
    }
}

/// One property, evaluated with and without the center: `None` = not computed yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Memo {
    with_center: Option<bool>,
    without_center: Option<bool>,
}

impl Memo {
    #[inline]
    fn get(&self, with_center: bool) -> Option<bool> {
        if with_center {
            self.with_center
        } else {
            self.without_center
        }
    }

    #[inline]
    fn set(&mut self, with_center: bool, value: bool) {
        if with_center {
            self.with_center = Some(value);
        } else {
            self.without_center = Some(value);
        }
    }
}

/// All memoized results for one center. Cleared as a whole by `set_center`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct LocalCache {
    full_x: Memo,
    full_comp_x: Memo,
    zero_x: Memo,
    zero_comp_x: Memo,
}

impl LocalCache {
    fn slot(&self, prop: LocalProperty) -> &Memo {
        match prop {
            LocalProperty::FullConvexity => &self.full_x,
            LocalProperty::ComplementFullConvexity => &self.full_comp_x,
            LocalProperty::ZeroConvexity => &self.zero_x,
            LocalProperty::ComplementZeroConvexity => &self.zero_comp_x,
        }
    }

    fn slot_mut(&mut self, prop: LocalProperty) -> &mut Memo {
        match prop {
            LocalProperty::FullConvexity => &mut self.full_x,
            LocalProperty::ComplementFullConvexity => &mut self.full_comp_x,
            LocalProperty::ZeroConvexity => &mut self.zero_x,
            LocalProperty::ComplementZeroConvexity => &mut self.zero_comp_x,
        }
    }

    #[inline]
    pub(crate) fn get(&self, prop: LocalProperty, with_center: bool) -> Option<bool> {
        self.slot(prop).get(with_center)
    }

    #[inline]
    pub(crate) fn set(&mut self, prop: LocalProperty, with_center: bool, value: bool) {
        self.slot_mut(prop).set(with_center, value);
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// `true` when nothing has been computed since the last clear.
    #[cfg(test)]
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
