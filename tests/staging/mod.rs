mod add_stages_file_for_the_next_commit;
mod commit_validations;
mod rm_tracked_file_marks_it_removed;
mod rm_unknown_file_fails;
