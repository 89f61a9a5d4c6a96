//! Per-file declaration arena.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::decl::{ClassDecl, FieldDecl};

/// Index of a class inside its [`SourceUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClassId(pub u32);

impl ClassId {
	#[inline]
	pub fn idx(self) -> usize {
		self.0 as usize
	}
}

/// Index of a field inside its [`SourceUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FieldId(pub u32);

impl FieldId {
	#[inline]
	pub fn idx(self) -> usize {
		self.0 as usize
	}
}

/// A declaration visited by the rule, in source order.
#[derive(Debug, Clone, Copy)]
pub enum Declaration<'a> {
	Class(ClassId, &'a ClassDecl),
	Field(FieldId, &'a FieldDecl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum DeclRef {
	Class(ClassId),
	Field(FieldId),
}

/// All declarations of one source file.
///
/// Classes and fields live in flat arenas; fields point back at their owner
/// by [`ClassId`] and classes list their fields by [`FieldId`]. Insertion
/// order is recorded so traversal follows source order.
#[derive(Debug, Clone, Serialize)]
pub struct SourceUnit {
	path: Arc<Path>,
	classes: Vec<ClassDecl>,
	fields: Vec<FieldDecl>,
	order: Vec<DeclRef>,
	/// Full source text, kept for hosts that render snippets.
	#[serde(skip)]
	source: Option<Arc<str>>,
}

impl SourceUnit {
	pub fn new(path: impl Into<Arc<Path>>) -> Self {
		Self {
			path: path.into(),
			classes: Vec::new(),
			fields: Vec::new(),
			order: Vec::new(),
			source: None,
		}
	}

	pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
		self.source = Some(source.into());
		self
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Shared handle to the path, for building locations.
	pub fn path_arc(&self) -> Arc<Path> {
		Arc::clone(&self.path)
	}

	pub fn source(&self) -> Option<&str> {
		self.source.as_deref()
	}

	/// Adds a class. Any fields already listed in `class.fields` are ignored;
	/// use [`SourceUnit::add_field`] to attach fields.
	pub fn add_class(&mut self, mut class: ClassDecl) -> ClassId {
		let id = ClassId(self.classes.len() as u32);
		class.fields.clear();
		self.classes.push(class);
		self.order.push(DeclRef::Class(id));
		id
	}

	/// Adds a field owned by `owner` (or by nothing, for top-level declarations).
	///
	/// An owner id that does not belong to this unit leaves the field orphaned.
	pub fn add_field(&mut self, owner: Option<ClassId>, mut field: FieldDecl) -> FieldId {
		let id = FieldId(self.fields.len() as u32);
		field.owner = owner.filter(|owner| owner.idx() < self.classes.len());
		if let Some(owner) = field.owner {
			self.classes[owner.idx()].fields.push(id);
		}
		self.fields.push(field);
		self.order.push(DeclRef::Field(id));
		id
	}

	pub fn class(&self, id: ClassId) -> Option<&ClassDecl> {
		self.classes.get(id.idx())
	}

	pub fn field(&self, id: FieldId) -> Option<&FieldDecl> {
		self.fields.get(id.idx())
	}

	/// Enclosing class of a field, if it has one.
	pub fn owner_of(&self, field: &FieldDecl) -> Option<&ClassDecl> {
		field.owner.and_then(|id| self.class(id))
	}

	pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDecl)> {
		self.classes.iter().enumerate().map(|(idx, class)| (ClassId(idx as u32), class))
	}

	pub fn fields(&self) -> impl Iterator<Item = (FieldId, &FieldDecl)> {
		self.fields.iter().enumerate().map(|(idx, field)| (FieldId(idx as u32), field))
	}

	/// Fields of one class, in declaration order.
	pub fn fields_of(&self, id: ClassId) -> impl Iterator<Item = (FieldId, &FieldDecl)> {
		self.class(id)
			.into_iter()
			.flat_map(|class| class.fields.iter())
			.filter_map(|&fid| self.field(fid).map(|field| (fid, field)))
	}

	/// Every declaration in the order it was added.
	pub fn declarations(&self) -> impl Iterator<Item = Declaration<'_>> {
		self.order.iter().filter_map(|decl| match *decl {
			DeclRef::Class(id) => self.class(id).map(|class| Declaration::Class(id, class)),
			DeclRef::Field(id) => self.field(id).map(|field| Declaration::Field(id, field)),
		})
	}

	pub fn class_by_name(&self, qualified_name: &str) -> Option<(ClassId, &ClassDecl)> {
		self.classes().find(|(_, class)| class.qualified_name == qualified_name)
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}
}
