//! # VariableFunction Module - *Lazy Elementwise Expression Nodes*
//!
//! A [`VariableFunction`] binds one elementwise operation to a fixed tuple of
//! operands (variables, scalars or other function nodes) without computing
//! anything.
//!
//! ## Role
//! - Composes arithmetic on labeled variables without materializing
//!   intermediates; nodes nest as operands of other nodes.
//! - Infers the coordinates and dimension mapping of the result under a
//!   join policy, on first query.
//!
//! ## Behaviour
//! - Metadata is cached together with the [`JoinId`] that produced it. A
//!   query under the same policy reuses the cache; a query under another
//!   policy recomputes it.
//! - Coordinates are the join of every labeled operand's coordinates.
//! - The dimension mapping is copied from the first labeled operand when all
//!   labeled operands share it, and otherwise rebuilt as the order-preserving
//!   union of their mappings, which fails when two operands order the same
//!   pair of dimensions differently.
//! - [`at`](VariableFunction::at) and [`data`](VariableFunction::data) are
//!   coordinate-free: operands are read by flat index aligned on their
//!   trailing dimension. Labeled access goes through
//!   [`select`](VariableFunction::select).
//! - Values are produced only by [`at`](VariableFunction::at),
//!   [`select`](VariableFunction::select), the lazy [`data`](VariableFunction::data)
//!   view, or [`materialize`](VariableFunction::materialize).
//!
//! ## Threading
//! - Not thread-safe: the metadata cache lives in a `RefCell`.
//! - Requesting metadata under another policy while a guard returned by
//!   [`coordinates`](VariableFunction::coordinates) is alive fails with
//!   [`MinframeError::MetadataInUse`].

use std::borrow::Borrow;
use std::cell::{Ref, RefCell};

use log::trace;

use crate::kernels::broadcast::{RowMajorIndices, broadcast_shape};
use crate::structs::coordinates::broadcast_coordinates;
use crate::structs::dimension::broadcast_dimensions;
use crate::traits::closure::{DataTuple, ElementFn, IntoOperand, OperandTuple};
use crate::traits::expression::{FlatData, VariableExpr};
use crate::{
    Coordinates, DefaultJoin, DimensionMapping, JoinId, JoinPolicy, LabelSpace, MinframeError,
    Selector, SpaceRef, TrivialBroadcast, Variable,
};

/// Cached metadata of a function node.
///
/// `join` is `None` until a computation has completed.
#[derive(Debug, Default)]
struct SpaceCache {
    space: LabelSpace,
    join: Option<JoinId>,
}

/// # VariableFunction
///
/// Deferred elementwise operation over a fixed-arity operand tuple.
///
/// ## Fields
/// - `f`: the operation, called with one value per operand.
/// - `args`: the operand tuple. Owned operands are moved in; reference
///   operands borrow for the node's lifetime.
/// - `cache`: coordinates and dimension mapping of the result, tagged with
///   the join policy that produced them.
///
/// ## Example
/// ```rust
/// use minframe::{Axis, Coordinates, DimensionMapping, Variable, VariableFunction};
///
/// let coords = Coordinates::from_axes([("x", Axis::new(["a", "b"]).unwrap())]);
/// let dims = DimensionMapping::new(["x"]).unwrap();
/// let v = Variable::from_values(vec![1, 2], coords, dims).unwrap();
///
/// let node = VariableFunction::from_operands(|a: i32, b: i32| a * b, (&v, 10));
/// assert_eq!(node.at(&[1]), Some(20));
/// assert_eq!(node.size().unwrap(), 2);
/// ```
pub struct VariableFunction<F, Args> {
    f: F,
    args: Args,
    cache: RefCell<SpaceCache>,
}

impl<F, Args> VariableFunction<F, Args>
where
    Args: OperandTuple,
    F: ElementFn<Args::Values>,
{
    /// Binds `f` to an operand tuple.
    ///
    /// A tuple made only of scalars is rejected at compile time.
    pub fn new(f: F, args: Args) -> Self {
        const { assert!(!Args::ALL_SCALAR, "a function node needs a labeled operand") };
        VariableFunction { f, args, cache: RefCell::new(SpaceCache::default()) }
    }

    /// Number of elements of the result under the default join.
    #[inline]
    pub fn size(&self) -> Result<usize, MinframeError> {
        self.size_with::<DefaultJoin>()
    }

    pub fn size_with<J: JoinPolicy>(&self) -> Result<usize, MinframeError> {
        Ok(self.space_with::<J>()?.size())
    }

    /// Number of dimensions of the result under the default join.
    #[inline]
    pub fn dimension(&self) -> Result<usize, MinframeError> {
        self.dimension_with::<DefaultJoin>()
    }

    pub fn dimension_with<J: JoinPolicy>(&self) -> Result<usize, MinframeError> {
        Ok(self.space_with::<J>()?.dimensions.len())
    }

    #[inline]
    pub fn dimension_labels(&self) -> Result<Ref<'_, [String]>, MinframeError> {
        self.dimension_labels_with::<DefaultJoin>()
    }

    pub fn dimension_labels_with<J: JoinPolicy>(&self) -> Result<Ref<'_, [String]>, MinframeError> {
        Ok(Ref::map(self.space_with::<J>()?, |space| space.dimensions.labels()))
    }

    #[inline]
    pub fn coordinates(&self) -> Result<Ref<'_, Coordinates>, MinframeError> {
        self.coordinates_with::<DefaultJoin>()
    }

    /// Coordinates of the result under `J`, computing them if needed.
    pub fn coordinates_with<J: JoinPolicy>(&self) -> Result<Ref<'_, Coordinates>, MinframeError> {
        Ok(Ref::map(self.space_with::<J>()?, |space| &space.coordinates))
    }

    #[inline]
    pub fn dimension_mapping(&self) -> Result<Ref<'_, DimensionMapping>, MinframeError> {
        self.dimension_mapping_with::<DefaultJoin>()
    }

    /// Dimension mapping of the result under `J`, computing it if needed.
    pub fn dimension_mapping_with<J: JoinPolicy>(
        &self,
    ) -> Result<Ref<'_, DimensionMapping>, MinframeError> {
        Ok(Ref::map(self.space_with::<J>()?, |space| &space.dimensions))
    }

    /// Coordinates and dimension mapping of the result under `J`.
    pub fn space_with<J: JoinPolicy>(&self) -> Result<Ref<'_, LabelSpace>, MinframeError> {
        {
            let cache = self.cache.try_borrow().map_err(|_| MinframeError::MetadataInUse)?;
            if cache.join == Some(J::ID) {
                return Ok(Ref::map(cache, |cache| &cache.space));
            }
        }
        self.compute_space::<J>()?;
        let cache = self.cache.try_borrow().map_err(|_| MinframeError::MetadataInUse)?;
        Ok(Ref::map(cache, |cache| &cache.space))
    }

    fn compute_space<J: JoinPolicy>(&self) -> Result<(), MinframeError> {
        let mut cache = self.cache.try_borrow_mut().map_err(|_| MinframeError::MetadataInUse)?;
        trace!("computing function metadata under {:?} (cached: {:?})", J::ID, cache.join);
        cache.join = None;
        let spaces = self.args.label_spaces::<J>()?;
        let SpaceCache { space, .. } = &mut *cache;
        let trivial = join_coordinates::<J>(&spaces, &mut space.coordinates);
        join_dimensions(&spaces, &mut space.dimensions, trivial)?;
        cache.join = Some(J::ID);
        Ok(())
    }

    /// Fills `output` with the join of every labeled operand's coordinates.
    pub fn broadcast_coordinates<J: JoinPolicy>(
        &self,
        output: &mut Coordinates,
    ) -> Result<TrivialBroadcast, MinframeError> {
        let spaces = self.args.label_spaces::<J>()?;
        Ok(join_coordinates::<J>(&spaces, output))
    }

    /// Fills `output` with the dimension mapping of the result.
    ///
    /// When `trivial` reports identical dimension sets and every labeled
    /// operand has the first one's mapping, that mapping is copied. Otherwise
    /// the mappings are merged by [`broadcast_dimensions`].
    pub fn broadcast_dimensions<J: JoinPolicy>(
        &self,
        output: &mut DimensionMapping,
        trivial: TrivialBroadcast,
    ) -> Result<(), MinframeError> {
        let spaces = self.args.label_spaces::<J>()?;
        join_dimensions(&spaces, output, trivial)
    }

    /// Element at a coordinate-free flat index.
    ///
    /// Every operand reads the index aligned on its trailing dimension.
    /// Returns `None` if any operand value is missing or out of range.
    #[inline]
    pub fn at(&self, index: &[usize]) -> Option<F::Output> {
        self.args.elements(index).map(|values| self.f.call(values))
    }

    /// Element addressed by labels, under the default join.
    ///
    /// Accepts a `Selector` by value or by reference.
    #[inline]
    pub fn select<S: Borrow<Selector>>(&self, selector: S) -> Result<Option<F::Output>, MinframeError> {
        self.select_with::<DefaultJoin, S>(selector)
    }

    /// Element addressed by labels under `J`.
    ///
    /// Each operand resolves the selector against its own coordinates.
    /// Under a policy that fills missing labels, a label absent from an
    /// operand yields `Ok(None)`.
    pub fn select_with<J: JoinPolicy, S: Borrow<Selector>>(
        &self,
        selector: S,
    ) -> Result<Option<F::Output>, MinframeError> {
        Ok(self
            .args
            .select_all::<J>(selector.borrow())?
            .map(|values| self.f.call(values)))
    }

    /// Lazy flat view of the result.
    ///
    /// Fails with `ShapeMismatch` if the operand shapes do not broadcast.
    pub fn data(&self) -> Result<FunctionData<'_, F, Args::Data<'_>>, MinframeError> {
        let args = self.args.data()?;
        let shape = broadcast_shape(&args.shapes())?;
        Ok(FunctionData { f: &self.f, args, shape })
    }

    #[inline]
    pub fn arguments(&self) -> &Args {
        &self.args
    }

    #[inline]
    pub fn operation(&self) -> &F {
        &self.f
    }

    /// Evaluates the node into a new variable under the default join.
    #[inline]
    pub fn materialize(&self) -> Result<Variable<F::Output>, MinframeError> {
        self.materialize_with::<DefaultJoin>()
    }

    /// Evaluates the node into a new variable over its coordinates under
    /// `J`, selecting every label combination in row-major order.
    pub fn materialize_with<J: JoinPolicy>(&self) -> Result<Variable<F::Output>, MinframeError> {
        let space = self.space_with::<J>()?.clone();
        let axes = space
            .dimensions
            .labels()
            .iter()
            .map(|dim| {
                space
                    .coordinates
                    .get(dim)
                    .ok_or_else(|| MinframeError::UnknownDimension { dimension: dim.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut values = Vec::with_capacity(space.size());
        for index in RowMajorIndices::new(&space.shape()) {
            let mut selector = Selector::new();
            for ((dim, axis), &pos) in space.dimensions.labels().iter().zip(&axes).zip(&index) {
                if let Some(label) = axis.label(pos) {
                    selector.insert(dim.as_str(), label);
                }
            }
            values.push(self.select_with::<J, _>(&selector)?);
        }
        trace!("materialized {} elements under {:?}", values.len(), J::ID);

        let LabelSpace { coordinates, dimensions } = space;
        Variable::new(values, coordinates, dimensions)
    }

    /// Binds `f` to arguments, converting each with [`IntoOperand`].
    ///
    /// Bare numbers become scalar operands.
    pub fn from_operands<T>(f: F, args: T) -> Self
    where
        T: IntoOperands<Operands = Args>,
    {
        Self::new(f, args.into_operands())
    }
}

fn join_coordinates<J: JoinPolicy>(spaces: &[SpaceRef<'_>], output: &mut Coordinates) -> TrivialBroadcast {
    let inputs: Vec<&Coordinates> = spaces.iter().map(|space| &space.coordinates).collect();
    broadcast_coordinates::<J>(output, &inputs)
}

// `spaces` holds the labeled operands in declared order.
fn join_dimensions(
    spaces: &[SpaceRef<'_>],
    output: &mut DimensionMapping,
    trivial: TrivialBroadcast,
) -> Result<(), MinframeError> {
    if let Some(first) = spaces.first() {
        if trivial.same_dimensions && spaces.iter().all(|space| space.dimensions == first.dimensions) {
            output.clone_from(&first.dimensions);
            return Ok(());
        }
    }
    let inputs: Vec<&DimensionMapping> = spaces.iter().map(|space| &space.dimensions).collect();
    broadcast_dimensions(output, &inputs)
}

/// Tuple form of [`IntoOperand`].
pub trait IntoOperands {
    type Operands: OperandTuple;

    fn into_operands(self) -> Self::Operands;
}

macro_rules! impl_into_operands {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: IntoOperand),+> IntoOperands for ($($name,)+) {
            type Operands = ($($name::Operand,)+);

            #[inline]
            fn into_operands(self) -> Self::Operands {
                ($(self.$idx.into_operand(),)+)
            }
        }
    };
}

impl_into_operands!(A 0);
impl_into_operands!(A 0, B 1);
impl_into_operands!(A 0, B 1, C 2);
impl_into_operands!(A 0, B 1, C 2, D 3);

impl<F, Args: std::fmt::Debug> std::fmt::Debug for VariableFunction<F, Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("VariableFunction");
        out.field("args", &self.args);
        match self.cache.try_borrow() {
            Ok(cache) => out.field("cached_join", &cache.join),
            Err(_) => out.field("cached_join", &"<in use>"),
        };
        out.finish()
    }
}

impl<F, Args> VariableExpr for VariableFunction<F, Args>
where
    Args: OperandTuple,
    F: ElementFn<Args::Values>,
{
    type Value = F::Output;
    type Data<'a>
        = FunctionData<'a, F, Args::Data<'a>>
    where
        Self: 'a;

    #[inline]
    fn label_space<J: JoinPolicy>(&self) -> Result<Option<SpaceRef<'_>>, MinframeError> {
        Ok(Some(SpaceRef::Cached(self.space_with::<J>()?)))
    }

    #[inline]
    fn element(&self, index: &[usize]) -> Option<F::Output> {
        self.at(index)
    }

    #[inline]
    fn select<J: JoinPolicy>(&self, selector: &Selector) -> Result<Option<F::Output>, MinframeError> {
        self.select_with::<J, _>(selector)
    }

    #[inline]
    fn data(&self) -> Result<Self::Data<'_>, MinframeError> {
        VariableFunction::data(self)
    }
}

impl<F, Args> IntoOperand for VariableFunction<F, Args>
where
    Args: OperandTuple,
    F: ElementFn<Args::Values>,
{
    type Operand = Self;

    #[inline]
    fn into_operand(self) -> Self {
        self
    }
}

impl<'a, F, Args> IntoOperand for &'a VariableFunction<F, Args>
where
    Args: OperandTuple,
    F: ElementFn<Args::Values>,
{
    type Operand = Self;

    #[inline]
    fn into_operand(self) -> Self {
        self
    }
}

/// Lazy flat view of a function node.
///
/// Applies the operation to the operands' flat views on every access. The
/// shape is the broadcast of the operand shapes.
pub struct FunctionData<'a, F, D> {
    f: &'a F,
    args: D,
    shape: Vec<usize>,
}

impl<F, D> FlatData for FunctionData<'_, F, D>
where
    D: DataTuple,
    F: ElementFn<D::Values>,
{
    type Value = F::Output;

    #[inline]
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    fn at(&self, index: &[usize]) -> Option<F::Output> {
        self.args.at(index).map(|values| self.f.call(values))
    }
}

impl<F, D: std::fmt::Debug> std::fmt::Debug for FunctionData<'_, F, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionData")
            .field("args", &self.args)
            .field("shape", &self.shape)
            .finish()
    }
}
