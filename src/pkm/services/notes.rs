use super::require_text;
use crate::clock::{Clock, SystemClock};
use crate::error::{PkmError, Result};
use crate::ids::{generate_unique, IdGenerator, TimestampIdGenerator, NOTE_PREFIX};
use crate::model::{Note, Placement};
use crate::schema::NoteRecord;
use crate::store::DocumentStore;
use log::info;

pub struct NoteService<S, G = TimestampIdGenerator, C = SystemClock> {
    store: S,
    ids: G,
    clock: C,
}

impl<S: DocumentStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self::with_parts(store, TimestampIdGenerator, SystemClock)
    }
}

impl<S: DocumentStore, G: IdGenerator, C: Clock> NoteService<S, G, C> {
    pub fn with_parts(store: S, ids: G, clock: C) -> Self {
        Self { store, ids, clock }
    }

    /// Captures a new note. Without a course it lands in the inbox.
    pub fn create_note(
        &self,
        content: &str,
        course: Option<&str>,
        topics: &[&str],
    ) -> Result<Note> {
        if content.trim().is_empty() {
            return Err(PkmError::Validation("note content cannot be empty".into()));
        }

        let mut doc = self.store.load()?;
        let id = generate_unique(&self.ids, NOTE_PREFIX, |candidate| doc.contains_id(candidate))?;

        let mut note = Note::new(id, content.to_string(), self.clock.now());
        note.placement = Placement::from_input(course);
        note.add_topics(topics);

        doc.notes.push(NoteRecord::from(&note));
        self.store.save(&doc)?;

        info!(
            "event=note_create module=notes id={} inbox={} topics={}",
            note.id,
            note.in_inbox(),
            note.topics.len()
        );
        Ok(note)
    }

    pub fn get_note(&self, id: &str) -> Result<Option<Note>> {
        let doc = self.store.load()?;
        doc.notes
            .into_iter()
            .find(|record| record.id == id)
            .map(Note::try_from)
            .transpose()
    }

    /// All notes in store order.
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let doc = self.store.load()?;
        doc.notes.into_iter().map(Note::try_from).collect()
    }

    pub fn get_inbox_notes(&self) -> Result<Vec<Note>> {
        self.filtered(|note| note.in_inbox())
    }

    pub fn get_notes_by_course(&self, course: &str) -> Result<Vec<Note>> {
        self.filtered(|note| note.placement.is_course(course))
    }

    pub fn get_notes_by_topic(&self, topic: &str) -> Result<Vec<Note>> {
        self.filtered(|note| note.has_topic(topic))
    }

    /// Files a note under `course`, taking it out of the inbox.
    pub fn organize_note(&self, id: &str, course: &str) -> Result<Option<Note>> {
        let course = require_text("course", course)?;
        let now = self.clock.now();
        self.update(id, |note| {
            note.placement = Placement::Course(course);
            note.modified_at = now;
        })
    }

    /// Appends the topics the note does not already have.
    pub fn add_topics(&self, id: &str, topics: &[&str]) -> Result<Option<Note>> {
        let now = self.clock.now();
        self.update(id, |note| {
            note.add_topics(topics);
            note.modified_at = now;
        })
    }

    /// Removes a note. Returns whether it existed.
    pub fn delete_note(&self, id: &str) -> Result<bool> {
        let mut doc = self.store.load()?;
        let Some(idx) = doc.note_index(id) else {
            return Ok(false);
        };
        doc.notes.remove(idx);
        self.store.save(&doc)?;
        info!("event=note_delete module=notes id={}", id);
        Ok(true)
    }

    fn filtered<F>(&self, keep: F) -> Result<Vec<Note>>
    where
        F: Fn(&Note) -> bool,
    {
        Ok(self.list_notes()?.into_iter().filter(|n| keep(n)).collect())
    }

    fn update<F>(&self, id: &str, change: F) -> Result<Option<Note>>
    where
        F: FnOnce(&mut Note),
    {
        let mut doc = self.store.load()?;
        let Some(idx) = doc.note_index(id) else {
            return Ok(None);
        };

        let mut note = Note::try_from(doc.notes[idx].clone())?;
        change(&mut note);
        doc.notes[idx] = NoteRecord::from(&note);
        self.store.save(&doc)?;

        info!("event=note_update module=notes id={}", id);
        Ok(Some(note))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::PkmError;
    use crate::model::Placement;
    use crate::services::fixtures::ServiceFixture;
    use crate::store::DocumentStore;

    #[test]
    fn inbox_note_and_course_note_land_in_the_right_views() {
        let fx = ServiceFixture::new();
        let notes = fx.notes();

        let inbox = notes.create_note("Biology lecture notes", None, &[]).unwrap();
        let filed = notes
            .create_note("Lecture summary", Some("Biology 101"), &[])
            .unwrap();

        let inbox_ids: Vec<_> = notes
            .get_inbox_notes()
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(inbox_ids, vec![inbox.id.clone()]);

        let by_course = notes.get_notes_by_course("Biology 101").unwrap();
        assert_eq!(by_course.len(), 1);
        assert_eq!(by_course[0].id, filed.id);
        assert!(!inbox_ids.contains(&filed.id));
    }

    #[test]
    fn inbox_is_exactly_the_notes_without_a_course() {
        let fx = ServiceFixture::new();
        let notes = fx.notes();
        notes.create_note("a", None, &[]).unwrap();
        notes.create_note("b", Some("Math"), &[]).unwrap();
        notes.create_note("c", Some("  "), &[]).unwrap();
        notes.create_note("d", Some("History"), &[]).unwrap();

        let inbox = notes.get_inbox_notes().unwrap();
        for note in notes.list_notes().unwrap() {
            let listed = inbox.iter().any(|n| n.id == note.id);
            assert_eq!(listed, note.placement == Placement::Inbox, "{}", note.id);
        }
        assert_eq!(inbox.len(), 2);
    }

    #[test]
    fn empty_content_is_rejected_without_writing() {
        let fx = ServiceFixture::new();
        let err = fx.notes().create_note("   \n", None, &[]).unwrap_err();
        assert!(matches!(err, PkmError::Validation(_)));
        assert_eq!(fx.store.save_count(), 0);
    }

    #[test]
    fn create_sets_timestamps_and_dedupes_topics() {
        let fx = ServiceFixture::new();
        let note = fx
            .notes()
            .create_note("Cell division", None, &["Biology", "Mitosis", "Biology"])
            .unwrap();

        assert_eq!(note.id, "n_1");
        assert_eq!(note.created_at, fx.clock.0);
        assert_eq!(note.modified_at, fx.clock.0);
        assert_eq!(note.topics, vec!["Biology", "Mitosis"]);
        assert!(note.linked_from_tasks.is_empty());
    }

    #[test]
    fn get_note_returns_none_for_unknown_id() {
        let fx = ServiceFixture::new();
        let notes = fx.notes();
        let created = notes.create_note("x", None, &[]).unwrap();

        assert_eq!(notes.get_note(&created.id).unwrap(), Some(created));
        assert_eq!(notes.get_note("n_404").unwrap(), None);
    }

    #[test]
    fn list_keeps_store_order() {
        let fx = ServiceFixture::new();
        let notes = fx.notes();
        for content in ["first", "second", "third"] {
            notes.create_note(content, None, &[]).unwrap();
        }
        let contents: Vec<_> = notes
            .list_notes()
            .unwrap()
            .into_iter()
            .map(|n| n.content)
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn organize_moves_note_out_of_inbox() {
        let fx = ServiceFixture::new();
        let notes = fx.notes();
        let note = notes.create_note("x", None, &[]).unwrap();

        let organized = notes.organize_note(&note.id, "Chemistry").unwrap().unwrap();
        assert_eq!(organized.placement.course(), Some("Chemistry"));
        assert!(notes.get_inbox_notes().unwrap().is_empty());
        assert_eq!(notes.get_notes_by_course("Chemistry").unwrap().len(), 1);
    }

    #[test]
    fn organize_unknown_note_is_none_and_does_not_save() {
        let fx = ServiceFixture::new();
        let notes = fx.notes();
        notes.create_note("x", None, &[]).unwrap();
        let saves = fx.store.save_count();

        assert!(notes.organize_note("n_404", "Chemistry").unwrap().is_none());
        assert_eq!(fx.store.save_count(), saves);
    }

    #[test]
    fn organize_rejects_blank_course() {
        let fx = ServiceFixture::new();
        let notes = fx.notes();
        let note = notes.create_note("x", None, &[]).unwrap();
        assert!(matches!(
            notes.organize_note(&note.id, " "),
            Err(PkmError::Validation(_))
        ));
    }

    #[test]
    fn add_topics_appends_only_new_ones() {
        let fx = ServiceFixture::new();
        let notes = fx.notes();
        let note = notes.create_note("x", None, &["Biology"]).unwrap();

        let updated = notes
            .add_topics(&note.id, &["Cells", "Biology", "Energy"])
            .unwrap()
            .unwrap();
        assert_eq!(updated.topics, vec!["Biology", "Cells", "Energy"]);

        assert_eq!(notes.get_notes_by_topic("Cells").unwrap().len(), 1);
        assert!(notes.get_notes_by_topic("cells").unwrap().is_empty());
        assert!(notes.add_topics("n_404", &["x"]).unwrap().is_none());
    }

    #[test]
    fn delete_reports_whether_note_existed() {
        let fx = ServiceFixture::new();
        let notes = fx.notes();
        let keep = notes.create_note("keep", None, &[]).unwrap();
        let gone = notes.create_note("gone", None, &[]).unwrap();

        assert!(notes.delete_note(&gone.id).unwrap());
        assert!(!notes.delete_note(&gone.id).unwrap());

        let remaining = notes.list_notes().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
    }

    #[test]
    fn two_services_see_each_others_writes() {
        let fx = ServiceFixture::new();
        let writer = fx.notes();
        let reader = fx.notes();

        let note = writer.create_note("shared", None, &[]).unwrap();
        writer.organize_note(&note.id, "Physics").unwrap();

        let seen = reader.get_note(&note.id).unwrap().unwrap();
        assert_eq!(seen.placement.course(), Some("Physics"));
        assert_eq!(fx.store.load().unwrap().notes.len(), 1);
    }

    #[test]
    fn write_failure_surfaces_as_error() {
        let fx = ServiceFixture::new();
        fx.store.set_simulate_write_error(true);
        assert!(matches!(
            fx.notes().create_note("x", None, &[]),
            Err(PkmError::Io(_))
        ));
    }
}
