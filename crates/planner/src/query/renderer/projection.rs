use crate::query::{
    ast::projection::{FieldSelection, Projection, RelationClause},
    dialect::Dialect,
    renderer::{Render, Renderer},
};

impl Render for Projection {
    fn render(&self, r: &mut Renderer) {
        match self {
            Projection::Default(text) => r.text.push_str(text),
            Projection::Fields(selection) => selection.render(r),
        }
    }
}

impl Render for FieldSelection {
    fn render(&self, r: &mut Renderer) {
        for column in &self.direct_columns {
            r.push_item(column);
        }
        for relation in &self.relations {
            relation.render(r);
        }
    }
}

impl Render for RelationClause {
    fn render(&self, r: &mut Renderer) {
        let clause = r.dialect.render_relation(self.table.as_str(), &self.columns);
        r.push_item(&clause);
    }
}

impl Projection {
    /// Renders the projection into the `select` expression for `dialect`.
    pub fn to_select(&self, dialect: &dyn Dialect) -> String {
        let mut renderer = Renderer::new(dialect);
        self.render(&mut renderer);
        renderer.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::projection::{FieldSelection, Projection},
        dialect::{Postgrest, PostgrestInner},
        renderer::{Render, Renderer},
    };
    use crate::relation;

    fn selection() -> FieldSelection {
        FieldSelection {
            direct_columns: vec!["id".to_string(), "federation_id".to_string()],
            relations: vec![
                relation!(Users => ["name", "username"]),
                relation!(WeightClasses => *),
            ],
        }
    }

    #[test]
    fn test_render_direct_columns_before_relations() {
        let mut renderer = Renderer::new(&Postgrest);
        selection().render(&mut renderer);

        assert_eq!(
            renderer.finish(),
            "id, federation_id, users (name, username), weight_classes (*)"
        );
    }

    #[test]
    fn test_render_inner_dialect() {
        let projection = Projection::Fields(selection());

        assert_eq!(
            projection.to_select(&PostgrestInner),
            "id, federation_id, users!inner(name, username), weight_classes!inner(*)"
        );
    }

    #[test]
    fn test_default_projection_is_verbatim_in_every_dialect() {
        let projection = Projection::Default("id, users ( name )".to_string());

        assert_eq!(projection.to_select(&Postgrest), "id, users ( name )");
        assert_eq!(projection.to_select(&PostgrestInner), "id, users ( name )");
    }

    #[test]
    fn test_relations_only() {
        let projection = Projection::Fields(FieldSelection {
            direct_columns: vec![],
            relations: vec![relation!(Division => ["name"])],
        });

        assert_eq!(projection.to_select(&Postgrest), "division (name)");
    }
}
