//! Static course catalog: the exam modules the tutor can teach.
//!
//! Chapter content is reference data baked into the binary. The catalog is
//! immutable after construction; the rest of the crate only needs
//! `topic id -> Chapter` lookups.

/// One course chapter. `content` is markdown with LaTeX formulas
/// (`$...$` inline, `$$...$$` display).
#[derive(Debug, Clone)]
pub struct Chapter {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub content: &'static str,
    pub key_points: &'static [&'static str],
}

/// Read-only chapter table, kept in course order.
#[derive(Debug, Clone)]
pub struct Catalog {
    chapters: Vec<Chapter>,
}

impl Catalog {
    /// The built-in exam-prep course.
    pub fn builtin() -> Self {
        Self {
            chapters: course_chapters(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Chapters in course order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }
}

fn course_chapters() -> Vec<Chapter> {
    vec![
        Chapter {
            id: "errors",
            title: "1. Errors and Significant Digits",
            description: "Where numerical error comes from and how it is measured: \
                          truncation vs. rounding, absolute and relative error, \
                          significant digits, and error propagation.",
            content: ERRORS_MD,
            key_points: &[
                "Absolute vs. relative error",
                "Truncation vs. rounding error",
                "Significant digits",
                "Error propagation in arithmetic",
            ],
        },
        Chapter {
            id: "nonlinear",
            title: "2. Roots of Nonlinear Equations",
            description: "Bisection, fixed-point iteration, and Newton's method: \
                          convergence conditions, convergence order, and the \
                          classic exam traps.",
            content: NONLINEAR_MD,
            key_points: &[
                "Bisection step-count bound",
                "Fixed-point convergence |φ'(x)| < 1",
                "Newton's method, quadratic convergence",
                "Choosing a starting point",
            ],
        },
        Chapter {
            id: "interpolation",
            title: "3. Interpolation",
            description: "Lagrange and Newton interpolating polynomials, divided \
                          differences, and the interpolation remainder term.",
            content: INTERPOLATION_MD,
            key_points: &[
                "Lagrange basis polynomials",
                "Divided-difference table",
                "Newton form of the interpolant",
                "Remainder R_n(x)",
            ],
        },
        Chapter {
            id: "integration",
            title: "4. Numerical Integration",
            description: "Newton-Cotes formulas, the composite trapezoidal and \
                          Simpson rules, and algebraic degree of precision.",
            content: INTEGRATION_MD,
            key_points: &[
                "Trapezoidal and Simpson rules",
                "Composite formulas and error terms",
                "Algebraic degree of precision",
                "Romberg extrapolation idea",
            ],
        },
        Chapter {
            id: "linear-systems",
            title: "5. Linear Systems",
            description: "Gaussian elimination with pivoting, LU factorization, \
                          and the Jacobi and Gauss-Seidel iterations.",
            content: LINEAR_SYSTEMS_MD,
            key_points: &[
                "Gaussian elimination with partial pivoting",
                "Doolittle LU factorization",
                "Jacobi vs. Gauss-Seidel",
                "Diagonal dominance and convergence",
            ],
        },
        Chapter {
            id: "ode",
            title: "6. Ordinary Differential Equations",
            description: "One-step methods for initial value problems: Euler, \
                          improved Euler, and the classical Runge-Kutta scheme.",
            content: ODE_MD,
            key_points: &[
                "Explicit and implicit Euler",
                "Improved Euler (Heun)",
                "Classical RK4",
                "Local vs. global truncation error",
            ],
        },
    ]
}

const ERRORS_MD: &str = r#"## Sources of error

Numerical computation deals with four kinds of error: modeling error,
measurement error, **truncation error** (replacing an infinite process with a
finite one), and **rounding error** (finite machine precision). Exams focus on
the last two.

For an exact value $x$ and an approximation $x^*$:

$$e = x - x^*, \qquad e_r = \frac{x - x^*}{x}$$

are the absolute and relative errors. A bound $\varepsilon$ with
$|x - x^*| \le \varepsilon$ is an *error limit*.

## Significant digits

$x^*$ has $n$ significant digits if its error limit is at most half a unit in
the $n$-th digit, counted from the first nonzero digit. Rule of thumb: one
more significant digit shrinks the relative error limit by a factor of 10.

## Propagation

For $y = f(x_1, x_2)$ a first-order estimate is

$$e(y) \approx \frac{\partial f}{\partial x_1} e(x_1)
             + \frac{\partial f}{\partial x_2} e(x_2).$$

Classic pitfalls:

1. Subtracting nearly equal numbers cancels leading digits.
2. Dividing by a tiny number inflates error.
3. Summing many terms: add the small ones first.
"#;

const NONLINEAR_MD: &str = r#"## Bisection

If $f$ is continuous on $[a, b]$ and $f(a)f(b) < 0$, halving the bracket $k$
times leaves an interval of width $(b-a)/2^k$. To reach tolerance
$\varepsilon$ you need

$$k \ge \log_2 \frac{b - a}{\varepsilon}.$$

Slow but guaranteed; the standard exam question asks for the minimum number
of steps.

## Fixed-point iteration

Rewrite $f(x) = 0$ as $x = \varphi(x)$ and iterate $x_{k+1} = \varphi(x_k)$.
Convergence on $[a, b]$ requires $\varphi$ to map the interval into itself
and $|\varphi'(x)| \le L < 1$. The smaller $L$, the faster the convergence;
different rearrangements of the same equation converge or diverge.

## Newton's method

$$x_{k+1} = x_k - \frac{f(x_k)}{f'(x_k)}$$

Geometrically: follow the tangent line to its root. Near a simple root the
convergence is quadratic (order 2). Watch for:

- $f'(x_k) \approx 0$ sends the iterate far away,
- multiple roots degrade convergence to linear,
- a poor start may cycle or diverge.
"#;

const INTERPOLATION_MD: &str = r#"## Lagrange form

Given nodes $x_0, \dots, x_n$ with values $y_i = f(x_i)$, the basis
polynomials

$$l_i(x) = \prod_{j \ne i} \frac{x - x_j}{x_i - x_j}$$

satisfy $l_i(x_j) = \delta_{ij}$, and $L_n(x) = \sum_i y_i\, l_i(x)$ is the
unique degree-$\le n$ interpolant.

## Newton form and divided differences

Divided differences are built recursively:

$$f[x_i, \dots, x_{i+k}] =
\frac{f[x_{i+1}, \dots, x_{i+k}] - f[x_i, \dots, x_{i+k-1}]}{x_{i+k} - x_i}$$

and the interpolant telescopes into

$$N_n(x) = f[x_0] + f[x_0, x_1](x - x_0) + \cdots +
f[x_0, \dots, x_n](x - x_0)\cdots(x - x_{n-1}).$$

Adding a node only appends one term; this is the form to use when the exam
adds "one more data point".

## Remainder

$$R_n(x) = \frac{f^{(n+1)}(\xi)}{(n+1)!} \prod_{i=0}^{n}(x - x_i)$$

for some $\xi$ in the node hull. The error bound question almost always
reduces to bounding $|f^{(n+1)}|$ on the interval.
"#;

const INTEGRATION_MD: &str = r#"## Newton-Cotes

Replace $f$ by its interpolant on equally spaced nodes and integrate.
With $h = b - a$:

- Trapezoid: $\int_a^b f \approx \frac{h}{2}\,[f(a) + f(b)]$, error
  $-\frac{h^3}{12} f''(\xi)$.
- Simpson: $\int_a^b f \approx \frac{h}{6}\,[f(a) + 4f(\tfrac{a+b}{2}) + f(b)]$,
  error $-\frac{h^5}{2880} f^{(4)}(\xi)$.

## Composite rules

Split $[a, b]$ into $n$ panels of width $h = (b-a)/n$:

$$T_n = h\left[\tfrac{1}{2}f(a) + \sum_{k=1}^{n-1} f(x_k) +
\tfrac{1}{2}f(b)\right],$$

with error $-\frac{(b-a)h^2}{12} f''(\eta)$; composite Simpson has error
$O(h^4)$. Exam task: pick $n$ so the error bound drops below a given
tolerance.

## Degree of precision

A rule has algebraic degree of precision $m$ if it is exact for every
polynomial of degree $\le m$ but not $m+1$. Trapezoid: 1. Simpson: 3
(the bonus degree is why Simpson is the default). Test with
$f = 1, x, x^2, \dots$ in order.
"#;

const LINEAR_SYSTEMS_MD: &str = r#"## Gaussian elimination

Forward-eliminate to upper triangular form, then back-substitute; about
$n^3/3$ multiplications. A zero (or tiny) pivot forces **partial pivoting**:
swap in the largest-magnitude candidate from the column. Small pivots
amplify rounding error even when elimination is formally possible.

## LU factorization

Doolittle: $A = LU$ with unit lower-triangular $L$. Solving $Ax = b$ becomes
two triangular solves $Ly = b$, $Ux = y$, which pays off for repeated
right-hand sides. Compute the factors column by column and keep the
multipliers as the entries of $L$.

## Iterative methods

Split $A = D - L - U$ and iterate:

- Jacobi: $x^{(k+1)} = D^{-1}\big[(L + U)x^{(k)} + b\big]$
- Gauss-Seidel: use the fresh components immediately,
  $x^{(k+1)} = (D - L)^{-1}\big[U x^{(k)} + b\big]$

Both converge if $A$ is strictly diagonally dominant by rows; in general
convergence holds iff the spectral radius of the iteration matrix is below
one. Gauss-Seidel typically converges about twice as fast as Jacobi when
both converge, but neither dominates universally.
"#;

const ODE_MD: &str = r#"## The initial value problem

$$y' = f(x, y), \qquad y(x_0) = y_0$$

advanced on a grid $x_{k+1} = x_k + h$. A one-step method has (local)
truncation error $O(h^{p+1})$ and global error $O(h^p)$ for order $p$.

## Euler variants

- Explicit Euler: $y_{k+1} = y_k + h f(x_k, y_k)$, order 1.
- Implicit Euler: $y_{k+1} = y_k + h f(x_{k+1}, y_{k+1})$, order 1 but far
  more stable; needs an equation solve per step.
- Improved Euler (Heun): predict with explicit Euler, then average the
  slopes; order 2.

## Classical Runge-Kutta (RK4)

$$\begin{aligned}
k_1 &= f(x_k, y_k) \\
k_2 &= f(x_k + \tfrac{h}{2},\; y_k + \tfrac{h}{2} k_1) \\
k_3 &= f(x_k + \tfrac{h}{2},\; y_k + \tfrac{h}{2} k_2) \\
k_4 &= f(x_k + h,\; y_k + h k_3) \\
y_{k+1} &= y_k + \tfrac{h}{6}(k_1 + 2k_2 + 2k_3 + k_4)
\end{aligned}$$

Order 4 with four slope evaluations per step. The standard exam exercise is
two or three RK4 steps by hand, tabulating the $k_i$.
"#;
