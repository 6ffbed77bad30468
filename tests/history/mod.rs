mod log_walks_first_parents;
