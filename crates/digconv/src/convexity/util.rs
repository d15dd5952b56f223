//! Small exact-arithmetic helpers: combinations, gcd, determinants, echelon bases.

/// Visit every k-combination of `0..n` in lexicographic order.
pub(crate) fn for_each_combination(n: usize, k: usize, mut f: impl FnMut(&[usize])) {
    if k > n {
        return;
    }
    let mut idxs: Vec<usize> = (0..k).collect();
    loop {
        f(&idxs);
        // next combination
        let mut i = k;
        loop {
            if i == 0 {
                return;
            }
            i -= 1;
            if idxs[i] != i + n - k {
                break;
            }
        }
        idxs[i] += 1;
        for j in i + 1..k {
            idxs[j] = idxs[j - 1] + 1;
        }
    }
}

pub(crate) fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Divide `v` by the gcd of its entries (no-op on the zero vector).
pub(crate) fn reduce_by_gcd(v: &mut [i128]) -> i128 {
    let g = v.iter().fold(0, |g, &x| gcd(g, x));
    if g > 1 {
        for x in v.iter_mut() {
            *x /= g;
        }
    }
    g
}

pub(crate) fn dot(a: &[i128], b: &[i128]) -> i128 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Exact determinant by fraction-free (Bareiss) elimination. `det([]) = 1`.
pub(crate) fn det_bareiss(mut m: Vec<Vec<i128>>) -> i128 {
    let n = m.len();
    if n == 0 {
        return 1;
    }
    let mut sign = 1;
    let mut prev = 1;
    for k in 0..n - 1 {
        if m[k][k] == 0 {
            match (k + 1..n).find(|&r| m[r][k] != 0) {
                Some(r) => {
                    m.swap(k, r);
                    sign = -sign;
                }
                None => return 0,
            }
        }
        for i in k + 1..n {
            for j in k + 1..n {
                m[i][j] = (m[i][j] * m[k][k] - m[i][k] * m[k][j]) / prev;
            }
        }
        prev = m[k][k];
    }
    sign * m[n - 1][n - 1]
}

/// Normal of the hyperplane spanned by `rows` (`r-1` vectors of length `r`),
/// via signed cofactors: `n_i = (-1)^i det(rows without column i)`.
///
/// The result is orthogonal to every row; it is zero iff the rows are dependent.
pub(crate) fn cofactor_normal(rows: &[Vec<i128>], r: usize) -> Vec<i128> {
    debug_assert!(rows.len() + 1 == r);
    (0..r)
        .map(|col| {
            let minor: Vec<Vec<i128>> = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .enumerate()
                        .filter(|&(j, _)| j != col)
                        .map(|(_, &x)| x)
                        .collect()
                })
                .collect();
            let d = det_bareiss(minor);
            if col % 2 == 0 {
                d
            } else {
                -d
            }
        })
        .collect()
}

/// Row-echelon basis of a linear subspace of `Z^n`, built incrementally.
///
/// Invariants:
/// - rows are sorted by pivot column and row `k` is zero left of `pivots[k]`;
/// - rows are primitive (gcd 1).
#[derive(Clone, Debug, Default)]
pub(crate) struct Echelon {
    rows: Vec<Vec<i128>>,
    pivots: Vec<usize>,
}

impl Echelon {
    pub(crate) fn rank(&self) -> usize {
        self.rows.len()
    }

    /// Pivot columns in increasing order. Projecting onto them is injective on the span.
    pub(crate) fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Eliminate the pivot entries of `v`; the result is zero iff `v` is in the span.
    fn reduce(&self, v: &mut [i128]) {
        for (row, &p) in self.rows.iter().zip(&self.pivots) {
            if v[p] == 0 {
                continue;
            }
            let (a, b) = (row[p], v[p]);
            for (x, &y) in v.iter_mut().zip(row) {
                *x = *x * a - y * b;
            }
            reduce_by_gcd(v);
        }
    }

    pub(crate) fn contains(&self, v: &[i128]) -> bool {
        let mut w = v.to_vec();
        self.reduce(&mut w);
        w.iter().all(|&x| x == 0)
    }

    /// Add `v` to the basis; returns `false` if it was already in the span.
    pub(crate) fn insert(&mut self, v: &[i128]) -> bool {
        let mut w = v.to_vec();
        self.reduce(&mut w);
        let Some(p) = w.iter().position(|&x| x != 0) else {
            return false;
        };
        reduce_by_gcd(&mut w);
        let at = self.pivots.partition_point(|&q| q < p);
        self.rows.insert(at, w);
        self.pivots.insert(at, p);
        true
    }
}
