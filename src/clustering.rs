//! (k, ℓ)-center and (k, ℓ)-median clustering of polygonal curves.
//!
//! Centers are drawn from the ℓ-vertex simplifications of the input curves.
//! Seeding is greedy farthest-first; the median objective adds a
//! gamma-improvement local search and the center objective an optional
//! swap-based refinement. Distances between inputs and candidate centers
//! are memoized in a lazily filled matrix owned by a [`ClusteringContext`];
//! reusing the context across calls (`consecutive_call`) reuses both the
//! matrix and the simplification store. A thread-local context backs the
//! convenience entry points for callers that do not manage one.

use std::cell::RefCell;
use std::time::Instant;

use log::{debug, info, trace, warn};
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

use crate::bounding::bounding_sphere;
use crate::config;
use crate::curve::{Curve, Curves};
use crate::dtw::{self, DtwDistance};
use crate::frechet::{self, ContinuousDistance, DiscreteDistance};
use crate::helpers::NUMERICAL_EPS;
use crate::iter_maybe_parallel;
use crate::point::{Point, Points};
use crate::random::UniformGenerator;
use crate::simplification;

/// Selector for the distance used by the clustering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceFunc {
    /// Continuous Fréchet distance.
    ContinuousFrechet,
    /// Discrete Fréchet distance.
    DiscreteFrechet,
    /// Discrete dynamic time warping.
    DynamicTimeWarping,
}

/// A distance computed under one of the selectable distance functions,
/// carrying the kind-specific extras.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveDistance {
    /// Continuous Fréchet result with its search statistics.
    ContinuousFrechet(ContinuousDistance),
    /// Discrete Fréchet result.
    DiscreteFrechet(DiscreteDistance),
    /// Dynamic time warping result with its matching.
    DynamicTimeWarping(DtwDistance),
}

impl CurveDistance {
    /// Compute the selected distance between two curves.
    pub fn compute(func: DistanceFunc, curve1: &Curve, curve2: &Curve) -> Self {
        match func {
            DistanceFunc::ContinuousFrechet => {
                Self::ContinuousFrechet(frechet::continuous_frechet(curve1, curve2))
            }
            DistanceFunc::DiscreteFrechet => {
                Self::DiscreteFrechet(frechet::discrete_frechet(curve1, curve2))
            }
            DistanceFunc::DynamicTimeWarping => {
                Self::DynamicTimeWarping(dtw::dtw(curve1, curve2))
            }
        }
    }

    /// The distance value.
    #[inline]
    pub fn value(&self) -> f64 {
        match self {
            Self::ContinuousFrechet(dist) => dist.value,
            Self::DiscreteFrechet(dist) => dist.value,
            Self::DynamicTimeWarping(dist) => dist.value,
        }
    }

    /// The selector this distance was computed under.
    #[inline]
    pub fn kind(&self) -> DistanceFunc {
        match self {
            Self::ContinuousFrechet(_) => DistanceFunc::ContinuousFrechet,
            Self::DiscreteFrechet(_) => DistanceFunc::DiscreteFrechet,
            Self::DynamicTimeWarping(_) => DistanceFunc::DynamicTimeWarping,
        }
    }
}

/// Lazily filled matrix of distances between input curves (rows) and
/// simplifications (columns). A stored cell is immutable until the matrix
/// is reallocated.
#[derive(Debug, Clone, Default)]
pub struct DistanceMatrix {
    cells: Vec<Option<CurveDistance>>,
    rows: usize,
    cols: usize,
}

impl DistanceMatrix {
    /// Allocate an unset matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![None; rows * cols],
            rows,
            cols,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the matrix holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn get(&self, i: usize, j: usize) -> Option<&CurveDistance> {
        self.cells[i * self.cols + j].as_ref()
    }

    fn set(&mut self, i: usize, j: usize, distance: CurveDistance) {
        let cell = &mut self.cells[i * self.cols + j];
        if cell.is_none() {
            *cell = Some(distance);
        }
    }
}

/// Caches shared between clustering calls: the distance matrix and the
/// simplification store, together with the parameters they were built for.
///
/// Not thread-safe by design; run concurrent clustering on separate
/// contexts (or processes).
#[derive(Debug, Default)]
pub struct ClusteringContext {
    distances: DistanceMatrix,
    simplifications: Vec<Option<Curve>>,
    input_size: usize,
    ell: usize,
    distance_func: Option<DistanceFunc>,
    fast_simplification: bool,
}

impl ClusteringContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all cached state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Make the caches valid for the given call; returns whether the
    /// distance matrix is enabled.
    fn prepare(
        &mut self,
        n: usize,
        ell: usize,
        func: DistanceFunc,
        fast_simplification: bool,
        consecutive_call: bool,
    ) -> bool {
        let footprint = n * n * std::mem::size_of::<Option<CurveDistance>>();
        let mut cache_enabled = config::use_distance_matrix();
        if cache_enabled && footprint > config::available_memory() / 3 * 2 {
            warn!(
                "predicted distance matrix footprint of {footprint} bytes exceeds two thirds \
                 of the memory budget, disabling memoization for this call"
            );
            cache_enabled = false;
        }

        let matches = self.input_size == n
            && self.ell == ell
            && self.distance_func == Some(func)
            && self.fast_simplification == fast_simplification;

        if consecutive_call && !matches {
            if self.input_size == 0 {
                warn!("consecutive_call used without a prior call; allocating");
            } else {
                warn!("consecutive_call used with different input or parameters; ignoring");
            }
        }

        if !(consecutive_call && matches) {
            if config::verbosity() >= 1 {
                info!("allocating {n} x {n} distance matrix and {n} simplification slots");
            }
            self.simplifications = vec![None; n];
            self.input_size = n;
            self.ell = ell;
            self.distance_func = Some(func);
            self.fast_simplification = fast_simplification;
            self.distances = if cache_enabled {
                DistanceMatrix::new(n, n)
            } else {
                DistanceMatrix::default()
            };
        } else if cache_enabled {
            if self.distances.rows() != n {
                self.distances = DistanceMatrix::new(n, n);
            }
        } else {
            self.distances = DistanceMatrix::default();
        }

        cache_enabled
    }

    /// Simplification of input curve `i`, computed on first reference.
    fn ensure_simplification(&mut self, input: &Curves, i: usize) {
        if self.simplifications[i].is_some() {
            return;
        }
        if config::verbosity() >= 1 {
            info!("computing simplification of curve {i}");
        }
        let curve = &input[i];
        let mut simplified = if self.fast_simplification {
            simplification::approximate_minimum_error_simplification(curve, self.ell)
        } else {
            simplification::minimum_error_simplification(curve, self.ell)
        };
        let name = if curve.name().is_empty() {
            format!("Simplification of curve {i}")
        } else {
            format!("Simplification of {}", curve.name())
        };
        simplified.set_name(name);
        self.simplifications[i] = Some(simplified);
    }

    /// Distance between input curve `i` and the simplification of curve
    /// `j`, memoized when the matrix is enabled.
    fn distance(&mut self, input: &Curves, i: usize, j: usize, use_cache: bool) -> f64 {
        self.ensure_simplification(input, j);
        if use_cache {
            if let Some(dist) = self.distances.get(i, j) {
                return dist.value();
            }
        }
        let func = self
            .distance_func
            .expect("context is prepared before distances are queried");
        let simplified = self.simplifications[j]
            .as_ref()
            .expect("simplification was just ensured");
        let dist = CurveDistance::compute(func, &input[i], simplified);
        let value = dist.value();
        if use_cache {
            self.distances.set(i, j, dist);
        }
        value
    }
}

thread_local! {
    static CONTEXT: RefCell<ClusteringContext> = RefCell::new(ClusteringContext::new());
}

/// Run `f` on the thread-local clustering context backing the convenience
/// entry points.
pub fn with_context<R>(f: impl FnOnce(&mut ClusteringContext) -> R) -> R {
    CONTEXT.with(|context| f(&mut context.borrow_mut()))
}

/// For each center, the input-curve indices assigned to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterAssignment {
    clusters: Vec<Vec<usize>>,
}

impl ClusterAssignment {
    /// Number of centers.
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether there are no centers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of curves assigned to center `i`.
    #[inline]
    pub fn count(&self, i: usize) -> usize {
        self.clusters[i].len()
    }

    /// The `j`-th curve index assigned to center `i`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.clusters[i][j]
    }

    /// Curve indices assigned to center `i`.
    #[inline]
    pub fn cluster(&self, i: usize) -> &[usize] {
        &self.clusters[i]
    }
}

/// Result of a (k, ℓ)-clustering call.
#[derive(Debug, Clone)]
pub struct ClusteringResult {
    /// The chosen center curves (simplifications of input curves).
    pub centers: Curves,
    /// Objective value: max (center) or sum (median) of the distances from
    /// the inputs to their nearest center.
    pub value: f64,
    /// Wall-clock seconds spent clustering.
    pub running_time: f64,
    /// Cluster assignment, once computed.
    pub assignment: Option<ClusterAssignment>,
    center_indices: Vec<usize>,
    distance_func: DistanceFunc,
}

impl ClusteringResult {
    /// Number of centers.
    #[inline]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Whether the result holds no centers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Center curve `i`.
    #[inline]
    pub fn get(&self, i: usize) -> &Curve {
        &self.centers[i]
    }

    /// Indices of the chosen centers within the input collection.
    #[inline]
    pub fn center_indices(&self) -> &[usize] {
        &self.center_indices
    }

    /// The distance selector the result was computed under.
    #[inline]
    pub fn distance_func(&self) -> DistanceFunc {
        self.distance_func
    }

    /// Assign every input curve to its nearest center, using the
    /// thread-local context.
    pub fn compute_assignment(&mut self, input: &Curves, consecutive_call: bool) {
        with_context(|context| self.compute_assignment_with(context, input, consecutive_call));
    }

    /// Assign every input curve to its nearest center.
    ///
    /// With `consecutive_call` and a context still valid for `input`, the
    /// memoized distances are read; otherwise distances to the center
    /// curves are computed afresh.
    pub fn compute_assignment_with(
        &mut self,
        context: &mut ClusteringContext,
        input: &Curves,
        consecutive_call: bool,
    ) {
        if config::verbosity() >= 2 {
            debug!("computing cluster assignment");
        }
        let k = self.centers.len();
        let mut clusters = vec![Vec::new(); k];
        if k == 0 {
            self.assignment = Some(ClusterAssignment { clusters });
            return;
        }

        let reusable = consecutive_call
            && context.input_size == input.len()
            && context.distance_func == Some(self.distance_func)
            && self
                .center_indices
                .iter()
                .all(|&c| c < context.simplifications.len());

        if reusable {
            let use_cache = !context.distances.is_empty();
            for i in 0..input.len() {
                let mut nearest = 0;
                let mut nearest_dist = f64::INFINITY;
                for (c, &center) in self.center_indices.iter().enumerate() {
                    let dist = context.distance(input, i, center, use_cache);
                    if dist < nearest_dist {
                        nearest_dist = dist;
                        nearest = c;
                    }
                }
                clusters[nearest].push(i);
            }
        } else {
            let centers = &self.centers;
            let func = self.distance_func;
            let nearest: Vec<usize> = iter_maybe_parallel!(0..input.len())
                .map(|i| {
                    let mut nearest = 0;
                    let mut nearest_dist = f64::INFINITY;
                    for c in 0..k {
                        let dist = CurveDistance::compute(func, &input[i], &centers[c]).value();
                        if dist < nearest_dist {
                            nearest_dist = dist;
                            nearest = c;
                        }
                    }
                    nearest
                })
                .collect();
            for (i, c) in nearest.into_iter().enumerate() {
                clusters[c].push(i);
            }
        }

        self.assignment = Some(ClusterAssignment { clusters });
    }

    /// Enclosing balls around the center vertices, using the thread-local
    /// context.
    pub fn compute_center_enclosing_balls(
        &mut self,
        input: &Curves,
        consecutive_call: bool,
    ) -> Vec<Vec<(Point, f64)>> {
        with_context(|context| {
            self.compute_center_enclosing_balls_with(context, input, consecutive_call)
        })
    }

    /// For each center and each of its vertices, the approximate minimum
    /// enclosing ball of the matching points collected from the curves
    /// assigned to that center.
    ///
    /// Matching points are recovered from the free-space diagram for the
    /// continuous Fréchet selector and by averaging multi-matched vertices
    /// of the warping (or discrete Fréchet) matching otherwise.
    pub fn compute_center_enclosing_balls_with(
        &mut self,
        context: &mut ClusteringContext,
        input: &Curves,
        consecutive_call: bool,
    ) -> Vec<Vec<(Point, f64)>> {
        if config::verbosity() >= 2 {
            debug!("computing center enclosing balls");
        }
        self.compute_assignment_with(context, input, consecutive_call);
        let assignment = self
            .assignment
            .as_ref()
            .expect("assignment was just computed");

        let mut result = Vec::with_capacity(self.centers.len());
        for (c, center) in self.centers.iter().enumerate() {
            if config::verbosity() >= 3 {
                trace!("collecting matching points for center {c}");
            }
            let mut matched: Vec<Points> = vec![Points::new(); center.len()];
            for &i in assignment.cluster(c) {
                let curve = &input[i];
                let points = match self.distance_func {
                    DistanceFunc::ContinuousFrechet => {
                        let dist = frechet::continuous_frechet(center, curve).value;
                        frechet::vertices_matching_points(center, curve, dist)
                    }
                    DistanceFunc::DiscreteFrechet => {
                        let matching = frechet::discrete_frechet_matching(center, curve);
                        dtw::vertices_matching_points(center, curve, &matching)
                    }
                    DistanceFunc::DynamicTimeWarping => {
                        let matching = dtw::dtw(center, curve).matching;
                        dtw::vertices_matching_points(center, curve, &matching)
                    }
                };
                for (v, point) in points.into_iter().enumerate() {
                    matched[v].push(point);
                }
            }
            result.push(matched.iter().map(|points| bounding_sphere(points)).collect());
        }
        result
    }
}

fn empty_result(func: DistanceFunc) -> ClusteringResult {
    ClusteringResult {
        centers: Curves::new(),
        value: 0.0,
        running_time: 0.0,
        assignment: None,
        center_indices: Vec::new(),
        distance_func: func,
    }
}

fn curve_cost(
    context: &mut ClusteringContext,
    input: &Curves,
    i: usize,
    centers: &[usize],
    use_cache: bool,
) -> f64 {
    let mut cost = f64::INFINITY;
    for &center in centers {
        cost = cost.min(context.distance(input, i, center, use_cache));
    }
    cost
}

fn cost_max(
    context: &mut ClusteringContext,
    input: &Curves,
    centers: &[usize],
    use_cache: bool,
) -> f64 {
    (0..input.len())
        .map(|i| curve_cost(context, input, i, centers, use_cache))
        .fold(0.0, f64::max)
}

fn cost_sum(
    context: &mut ClusteringContext,
    input: &Curves,
    centers: &[usize],
    use_cache: bool,
) -> f64 {
    (0..input.len())
        .map(|i| curve_cost(context, input, i, centers, use_cache))
        .sum()
}

#[allow(clippy::too_many_arguments)]
fn kl_cluster(
    num_centers: usize,
    ell: usize,
    input: &Curves,
    local_search: usize,
    median: bool,
    consecutive_call: bool,
    random_start: bool,
    fast_simplification: bool,
    func: DistanceFunc,
    context: &mut ClusteringContext,
) -> ClusteringResult {
    let start = Instant::now();

    if input.is_empty() {
        return empty_result(func);
    }
    let n = input.len();

    let use_cache = context.prepare(n, ell, func, fast_simplification, consecutive_call);

    let mut centers: Vec<usize> = Vec::with_capacity(num_centers);

    if config::verbosity() >= 1 {
        info!("computing first center");
    }
    let first = if random_start {
        let mut generator = UniformGenerator::new();
        ((generator.get() * n as f64).floor() as usize).min(n - 1)
    } else {
        0
    };
    context.ensure_simplification(input, first);
    centers.push(first);
    if config::verbosity() >= 1 {
        info!("first center is curve {first}");
    }

    // Farthest-first: the next center is the input curve farthest from its
    // nearest chosen center, first maximizer wins.
    while centers.len() < num_centers && centers.len() < n {
        let mut max_cost = 0.0;
        let mut max_curve = 0;
        for j in 0..n {
            let cost = curve_cost(context, input, j, &centers, use_cache);
            if cost > max_cost {
                max_cost = cost;
                max_curve = j;
            }
        }
        if centers.contains(&max_curve) {
            warn!(
                "all remaining curves coincide with chosen centers, stopping at {} centers",
                centers.len()
            );
            break;
        }
        context.ensure_simplification(input, max_curve);
        centers.push(max_curve);
        if config::verbosity() >= 1 {
            info!("center {} is curve {max_curve}", centers.len());
        }
    }

    let mut value = cost_max(context, input, &centers, use_cache);
    if config::verbosity() >= 1 {
        info!("farthest-first cost is {value}");
    }

    if !median && local_search > 0 {
        if config::verbosity() >= 1 {
            info!("running {local_search} local search passes for the center objective");
        }
        let mut cost = value;
        for _ in 0..local_search {
            for i in 0..centers.len() {
                for j in 0..n {
                    if centers.contains(&j) {
                        continue;
                    }
                    let previous = centers[i];
                    centers[i] = j;
                    let swapped_cost = cost_max(context, input, &centers, use_cache);
                    if swapped_cost < cost {
                        if config::verbosity() >= 2 {
                            debug!("cost improves to {swapped_cost}");
                        }
                        cost = swapped_cost;
                    } else {
                        centers[i] = previous;
                    }
                }
            }
        }
        value = cost;
    }

    if median {
        let mut cost = cost_sum(context, input, &centers, use_cache);
        if config::verbosity() >= 1 {
            info!("k-median cost after seeding is {cost}");
        }
        let approx_cost = cost;
        let gamma = 1.0 / (10.0 * num_centers as f64);

        loop {
            let mut improved = false;
            'scan: for i in 0..centers.len() {
                for j in 0..n {
                    if centers.contains(&j) {
                        continue;
                    }
                    let previous = centers[i];
                    centers[i] = j;
                    let swapped_cost = cost_sum(context, input, &centers, use_cache);
                    if swapped_cost < cost - gamma * approx_cost {
                        if config::verbosity() >= 2 {
                            debug!("cost improves to {swapped_cost}");
                        }
                        cost = swapped_cost;
                        improved = true;
                        break 'scan;
                    }
                    centers[i] = previous;
                }
            }
            if !improved {
                break;
            }
        }
        value = cost;
        if value < NUMERICAL_EPS {
            warn!("clustering cost is zero, all inputs collapse onto the chosen centers");
        }
    }

    let center_curves: Curves = centers
        .iter()
        .map(|&c| {
            context.simplifications[c]
                .clone()
                .expect("center simplifications are computed when chosen")
        })
        .collect();

    ClusteringResult {
        centers: center_curves,
        value,
        running_time: start.elapsed().as_secs_f64(),
        assignment: None,
        center_indices: centers,
        distance_func: func,
    }
}

/// Curve-to-curve distance memoized symmetrically in a local matrix.
fn symmetric_distance(
    matrix: &mut DistanceMatrix,
    input: &Curves,
    func: DistanceFunc,
    i: usize,
    j: usize,
) -> f64 {
    if let Some(dist) = matrix.get(i, j) {
        return dist.value();
    }
    let dist = CurveDistance::compute(func, &input[i], &input[j]);
    let value = dist.value();
    matrix.set(j, i, dist.clone());
    matrix.set(i, j, dist);
    value
}

/// 1-median over the input curves by uniform sampling.
///
/// Draws 60 candidate curves and `⌈ln 60 / ε²⌉` witness curves uniformly,
/// keeps the candidate with the smallest witness objective and reports the
/// full objective for it. Centers are input curves, not simplifications;
/// compute assignments for this result with `consecutive_call = false`.
pub fn one_median_sampling(
    epsilon: f64,
    input: &Curves,
    distance_func: DistanceFunc,
) -> ClusteringResult {
    let start = Instant::now();
    if input.is_empty() {
        return empty_result(distance_func);
    }
    if !epsilon.is_finite() || epsilon <= 0.0 {
        warn!("median sampling requires a positive epsilon, got {epsilon}");
        return empty_result(distance_func);
    }
    let n = input.len();
    let mut matrix = DistanceMatrix::new(n, n);

    let candidate_count = 60;
    let witness_count = (60f64.ln() / (epsilon * epsilon)).ceil() as usize;
    if config::verbosity() >= 1 {
        info!("sampling {candidate_count} candidates and {witness_count} witnesses");
    }

    let mut generator = UniformGenerator::new();
    let draw = |r: f64| ((r * n as f64).floor() as usize).min(n - 1);
    let candidates: Vec<usize> = generator.get_n(candidate_count).into_iter().map(draw).collect();
    let witnesses: Vec<usize> = generator.get_n(witness_count).into_iter().map(draw).collect();

    let mut best_candidate = 0;
    let mut best_objective = f64::INFINITY;
    for &candidate in &candidates {
        let objective: f64 = witnesses
            .iter()
            .map(|&witness| symmetric_distance(&mut matrix, input, distance_func, candidate, witness))
            .sum();
        if objective < best_objective {
            best_objective = objective;
            best_candidate = candidate;
        }
    }

    let value: f64 = (0..n)
        .map(|i| symmetric_distance(&mut matrix, input, distance_func, best_candidate, i))
        .sum();
    if value < NUMERICAL_EPS {
        warn!("sampled median cost is zero, all inputs coincide with the center");
    }

    let mut centers = Curves::new();
    let _ = centers.add(input[best_candidate].clone());

    ClusteringResult {
        centers,
        value,
        running_time: start.elapsed().as_secs_f64(),
        assignment: None,
        center_indices: vec![best_candidate],
        distance_func,
    }
}

/// Exact 1-median over the input curves by exhaustive search.
///
/// Evaluates every curve as the center and keeps the first minimizer of
/// the summed distance. Centers are input curves, not simplifications;
/// compute assignments for this result with `consecutive_call = false`.
pub fn one_median_exhaustive(input: &Curves, distance_func: DistanceFunc) -> ClusteringResult {
    let start = Instant::now();
    if input.is_empty() {
        return empty_result(distance_func);
    }
    let n = input.len();
    let mut matrix = DistanceMatrix::new(n, n);

    let mut best_candidate = 0;
    let mut best_objective = f64::INFINITY;
    for i in 0..n {
        let objective: f64 = (0..n)
            .map(|j| symmetric_distance(&mut matrix, input, distance_func, i, j))
            .sum();
        if objective < best_objective {
            best_objective = objective;
            best_candidate = i;
        }
        if config::verbosity() >= 3 {
            trace!("candidate {i} has objective {objective}");
        }
    }

    let mut centers = Curves::new();
    let _ = centers.add(input[best_candidate].clone());

    ClusteringResult {
        centers,
        value: best_objective,
        running_time: start.elapsed().as_secs_f64(),
        assignment: None,
        center_indices: vec![best_candidate],
        distance_func,
    }
}

/// (k, ℓ)-center clustering using the thread-local context.
#[allow(clippy::too_many_arguments)]
pub fn kl_center(
    num_centers: usize,
    ell: usize,
    input: &Curves,
    local_search: usize,
    consecutive_call: bool,
    random_start: bool,
    fast_simplification: bool,
    distance_func: DistanceFunc,
) -> ClusteringResult {
    with_context(|context| {
        kl_center_with(
            context,
            num_centers,
            ell,
            input,
            local_search,
            consecutive_call,
            random_start,
            fast_simplification,
            distance_func,
        )
    })
}

/// (k, ℓ)-center clustering on an explicit context.
///
/// Greedy farthest-first seeding; `local_search > 0` adds that many passes
/// of swap-any refinement. The objective is the maximum distance from an
/// input curve to its nearest center.
#[allow(clippy::too_many_arguments)]
pub fn kl_center_with(
    context: &mut ClusteringContext,
    num_centers: usize,
    ell: usize,
    input: &Curves,
    local_search: usize,
    consecutive_call: bool,
    random_start: bool,
    fast_simplification: bool,
    distance_func: DistanceFunc,
) -> ClusteringResult {
    kl_cluster(
        num_centers,
        ell,
        input,
        local_search,
        false,
        consecutive_call,
        random_start,
        fast_simplification,
        distance_func,
        context,
    )
}

/// (k, ℓ)-median clustering using the thread-local context.
pub fn kl_median(
    num_centers: usize,
    ell: usize,
    input: &Curves,
    consecutive_call: bool,
    fast_simplification: bool,
    distance_func: DistanceFunc,
) -> ClusteringResult {
    with_context(|context| {
        kl_median_with(
            context,
            num_centers,
            ell,
            input,
            consecutive_call,
            fast_simplification,
            distance_func,
        )
    })
}

/// (k, ℓ)-median clustering on an explicit context.
///
/// Farthest-first seeding followed by gamma-improvement local search with
/// `γ = 1 / (10 k)`: the first swap improving the cost by at least
/// `γ · approx_cost` commits and restarts the scan. The objective is the
/// sum of distances from the inputs to their nearest centers.
pub fn kl_median_with(
    context: &mut ClusteringContext,
    num_centers: usize,
    ell: usize,
    input: &Curves,
    consecutive_call: bool,
    fast_simplification: bool,
    distance_func: DistanceFunc,
) -> ClusteringResult {
    kl_cluster(
        num_centers,
        ell,
        input,
        0,
        true,
        consecutive_call,
        true,
        fast_simplification,
        distance_func,
        context,
    )
}
